//! Per-instruction console display of machine state.
//!
//! Three tables are drawn after every executed line: the register file with
//! the program counter, the flag bits, and the 8x8 memory grid.

use std::io::{self, Write};

use machine_core::{Flags, MachineState, MEMORY_ROW_CELLS, REGISTER_COUNT};

const REGISTER_RULE_WIDTH: usize = 35;
const FLAG_RULE_WIDTH: usize = 20;
const MEMORY_RULE_WIDTH: usize = 55;

/// Writes the register, flag, and memory tables for `state`.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render_state(out: &mut dyn Write, state: &MachineState) -> io::Result<()> {
    render_registers(out, state)?;
    render_flags(out, state.flags())?;
    render_memory(out, state)
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

fn render_registers(out: &mut dyn Write, state: &MachineState) -> io::Result<()> {
    let header: String = (0..REGISTER_COUNT)
        .map(|index| format!("{index:>3}  "))
        .collect();
    writeln!(out, "{}", header.trim_end())?;

    let separator = format!("{}          ---", rule(REGISTER_RULE_WIDTH));
    writeln!(out, "{separator}")?;

    let cells: String = state
        .registers()
        .values()
        .iter()
        .map(|value| format!("{value:>3} |"))
        .collect();
    writeln!(out, "|{cells}      PC |{}|", state.pc())?;

    writeln!(out, "{separator}")
}

fn render_flags(out: &mut dyn Write, flags: Flags) -> io::Result<()> {
    let header: String = Flags::LABELS
        .iter()
        .map(|label| format!("{label:>4} "))
        .collect();
    writeln!(out, "{}", header.trim_end())?;
    writeln!(out, "{}", rule(FLAG_RULE_WIDTH))?;

    let cells: String = flags
        .bits()
        .iter()
        .map(|set| if *set { " 1 | " } else { "   | " })
        .collect();
    writeln!(out, "|{}", cells.trim_end())?;

    writeln!(out, "{}", rule(FLAG_RULE_WIDTH))
}

fn render_memory(out: &mut dyn Write, state: &MachineState) -> io::Result<()> {
    let header: String = (0..MEMORY_ROW_CELLS)
        .map(|column| format!("{column:>4}   "))
        .collect();
    writeln!(out, "{}", header.trim_end())?;
    writeln!(out, "{}", rule(MEMORY_RULE_WIDTH))?;

    for row in state.memory().rows() {
        let cells: String = row.iter().map(|cell| memory_cell(*cell)).collect();
        writeln!(out, "|  {}", cells.trim_end())?;
        writeln!(out, "{}", rule(MEMORY_RULE_WIDTH))?;
    }

    Ok(())
}

// Empty cells render blank so written values stand out.
fn memory_cell(value: u8) -> String {
    if value == 0 {
        "     | ".to_string()
    } else {
        format!("{value:>3}  | ")
    }
}
