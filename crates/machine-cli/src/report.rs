//! End-of-run state dump.
//!
//! ```text
//! Registers: 8 0000 8 0000 0000 0000 0000 #
//! Flags    : 0 0 0 0 #
//! PC       : 6
//! Memory:
//!    8 0000 0000 0000 0000 0000 0000 0000
//! ...
//! #
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use machine_core::MachineState;

use crate::errors::RunError;

/// Renders the final report for `state`.
#[must_use]
pub fn render_report(state: &MachineState) -> String {
    let mut report = String::new();

    let registers: Vec<String> = state
        .registers()
        .values()
        .iter()
        .map(|value| register_cell(*value))
        .collect();
    let _ = writeln!(report, "Registers: {} #", registers.join(" "));

    let flags: Vec<&str> = state
        .flags()
        .bits()
        .iter()
        .map(|set| if *set { "1" } else { "0" })
        .collect();
    let _ = writeln!(report, "Flags    : {} #", flags.join(" "));
    let _ = writeln!(report, "PC       : {}", state.pc());

    report.push_str("Memory:\n");
    for row in state.memory().rows() {
        let cells: Vec<String> = row.iter().map(|cell| memory_cell(*cell)).collect();
        report.push_str(&cells.join(" "));
        report.push('\n');
    }
    report.push_str("#\n");

    report
}

/// Writes the final report for `state` to `path`.
///
/// # Errors
///
/// Returns [`RunError::WriteReport`] if the file cannot be written.
pub fn write_report(path: &Path, state: &MachineState) -> Result<(), RunError> {
    fs::write(path, render_report(state)).map_err(|source| RunError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

fn register_cell(value: u8) -> String {
    if value == 0 {
        "0000".to_string()
    } else {
        value.to_string()
    }
}

fn memory_cell(value: u8) -> String {
    if value == 0 {
        "0000".to_string()
    } else {
        format!("{value:>4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use machine_core::Register;

    #[test]
    fn fresh_machine_report() {
        let state = MachineState::default();
        let report = render_report(&state);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Registers: 0000 0000 0000 0000 0000 0000 0000 #");
        assert_eq!(lines[1], "Flags    : 0 0 0 0 #");
        assert_eq!(lines[2], "PC       : 1");
        assert_eq!(lines[3], "Memory:");
        for row in &lines[4..12] {
            assert_eq!(*row, "0000 0000 0000 0000 0000 0000 0000 0000");
        }
        assert_eq!(lines[12], "#");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn nonzero_values_render_plainly_or_right_aligned() {
        let mut state = MachineState::default();
        state.set_register(Register::R0, 8);
        state.set_register(Register::R2, 255);
        state.memory_mut().write(0, 8).expect("address 0 is in range");
        state.memory_mut().write(15, 123).expect("address 15 is in range");
        state.end_cycle();

        let report = render_report(&state);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Registers: 8 0000 255 0000 0000 0000 0000 #");
        assert_eq!(lines[2], "PC       : 2");
        assert_eq!(lines[4], "   8 0000 0000 0000 0000 0000 0000 0000");
        assert_eq!(lines[5], "0000 0000 0000 0000 0000 0000 0000  123");
    }

    #[test]
    fn flags_line_reflects_current_flags() {
        let mut state = MachineState::default();
        state.raise_flags(machine_core::Flags {
            underflow: true,
            ..machine_core::Flags::default()
        });

        assert!(render_report(&state).contains("Flags    : 0 0 1 0 #\n"));
    }
}
