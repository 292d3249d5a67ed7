//! Console front end for the register machine: program ingestion, run loop,
//! state display, and the end-of-run report.

use clap as _;
use simple_logger as _;
#[cfg(test)]
use tempfile as _;

/// Per-instruction console display.
pub mod display;
/// Errors that abort a run.
pub mod errors;
/// End-of-run report rendering.
pub mod report;
/// Run loop and console I/O port.
pub mod runner;
/// Program text ingestion and tokenization.
pub mod tokenizer;

pub use errors::RunError;
pub use report::{render_report, write_report};
pub use runner::{run_program, Console, ConsolePort, LineError, RunConfig, RunSummary};
pub use tokenizer::{source_lines, tokenize, SourceLine};
