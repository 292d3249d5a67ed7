//! Integration tests for the regmachine CLI.

use clap as _;
use log as _;
use machine_cli as _;
use machine_core as _;
use simple_logger as _;
use thiserror as _;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_regmachine"))
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_with_input(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run regmachine");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

const ADD_PROGRAM: &str = "MOV 5,R0\nMOV 3,R1\nADD R1,R0\nSTORE R0,0\nLOAD R2,0\n";

#[test]
fn runs_program_and_writes_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "add.asm", ADD_PROGRAM);
    let report = temp_dir.path().join("add.txt");

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "-o", report.to_str().unwrap()])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run regmachine");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let text = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Registers: 8 3 8 0000 0000 0000 0000 #");
    assert_eq!(lines[1], "Flags    : 0 0 0 0 #");
    assert_eq!(lines[2], "PC       : 6");
    assert_eq!(lines[3], "Memory:");
    assert_eq!(lines[4], "   8 0000 0000 0000 0000 0000 0000 0000");
    assert_eq!(lines[11], "0000 0000 0000 0000 0000 0000 0000 0000");
    assert_eq!(lines[12], "#");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ADD R1,R0"));
    assert!(stdout.contains("  CF   OF   UF   ZF"));
    assert!(stdout.contains("      PC |5|"));
}

#[test]
fn report_defaults_next_to_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", "MOV 1,R0\n");

    let status = Command::new(binary_path())
        .arg(&source)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .expect("failed to run regmachine");

    assert!(status.success());
    assert!(temp_dir.path().join("prog.report.txt").exists());
}

#[test]
fn no_display_suppresses_tables() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "quiet.asm", ADD_PROGRAM);

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "--no-display"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run regmachine");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(temp_dir.path().join("quiet.report.txt").exists());
}

#[test]
fn bad_instructions_are_reported_and_run_continues() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(
        temp_dir.path(),
        "bad.asm",
        "MOV 7,R0\nJMP 3\nDIV 0,R0\nMOV 1,R9\nINC R0\n",
    );

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "--no-display"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run regmachine");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2: error: invalid instruction `JMP`"));
    assert!(stderr.contains("line 3: error: division by zero"));
    assert!(stderr.contains("line 4: error: invalid destination register `R9`"));

    let report = fs::read_to_string(temp_dir.path().join("bad.report.txt")).unwrap();
    assert!(report.starts_with("Registers: 8 0000"));
    assert!(report.contains("PC       : 6\n"));
}

#[test]
fn in_and_out_use_the_console() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "io.asm", "IN R1\nINC R1\nOUT R1\n");

    let output = run_with_input(&[source.to_str().unwrap(), "--no-display"], "41\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("User input => "));
    assert!(stdout.contains("Output screen: 42"));

    let report = fs::read_to_string(temp_dir.path().join("io.report.txt")).unwrap();
    assert!(report.starts_with("Registers: 0000 42 0000"));
}

#[test]
fn missing_source_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope.asm");

    let output = Command::new(binary_path())
        .arg(&missing)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run regmachine");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: unable to read program source"));
    assert!(!temp_dir.path().join("nope.report.txt").exists());
}

#[test]
fn unwritable_report_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", "MOV 1,R0\n");
    let report = temp_dir.path().join("no-such-dir").join("out.txt");

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "-o", report.to_str().unwrap()])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run regmachine");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: unable to write report"));
}

#[test]
fn missing_arguments_exit_with_usage_error() {
    let output = Command::new(binary_path())
        .output()
        .expect("failed to run regmachine");

    assert_eq!(output.status.code(), Some(2));
}
