//! CLI entry point for the `regmachine` binary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use machine_cli::{run_program, write_report, Console, ConsolePort, RunConfig, RunError};
use machine_core::MachineState;
use simple_logger::SimpleLogger;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

/// Runs a register machine program and writes the final state report.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "regmachine", version, about)]
struct Args {
    /// Program source, one instruction per line.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Report path (default: input stem + .report.txt, next to the input).
    #[arg(short, long, value_name = "REPORT")]
    output: Option<PathBuf>,

    /// Skip the per-instruction register/flag/memory tables.
    #[arg(long, default_value_t = false)]
    no_display: bool,

    /// Raise log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable logging entirely.
    #[arg(long, default_value_t = false, conflicts_with = "verbose")]
    quiet_log: bool,
}

impl Args {
    const fn log_level(&self) -> LevelFilter {
        if self.quiet_log {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    const fn run_config(&self) -> RunConfig {
        RunConfig {
            display: !self.no_display,
        }
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("program");

    let parent = input.parent().unwrap_or_else(|| Path::new(""));

    parent.join(format!("{stem}.report.txt"))
}

fn run(args: &Args) -> Result<(), RunError> {
    let source = fs::read_to_string(&args.input).map_err(|source| RunError::ReadSource {
        path: args.input.clone(),
        source,
    })?;

    let mut state = MachineState::default();
    let mut port = ConsolePort::stdio();
    let mut display = std::io::stdout();
    let mut diagnostics = std::io::stderr();

    let summary = run_program(
        &source,
        &mut state,
        args.run_config(),
        &mut Console {
            port: &mut port,
            display: &mut display,
            diagnostics: &mut diagnostics,
        },
    )?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_report(&output_path, &state)?;

    log::info!(
        "ran {} ({} executed, {} failed) -> {}",
        args.input.display(),
        summary.executed,
        summary.errors.len(),
        output_path.display()
    );

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = SimpleLogger::new().with_level(args.log_level()).init() {
        eprintln!("warning: logger unavailable: {e}");
    }

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}
