//! Program run loop and console I/O port.

use std::io::{self, BufRead, Write};

use machine_core::{step_one, ExecError, IoPort, MachineState, PortError};

use crate::display::render_state;
use crate::errors::RunError;
use crate::tokenizer::source_lines;

/// Options that shape a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Echo each line and draw the state tables after it executes.
    pub display: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { display: true }
    }
}

/// A recoverable error raised by one program line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// Program counter at the failing instruction.
    pub pc: u32,
    /// 1-indexed line number in the source file.
    pub file_line: usize,
    /// What went wrong.
    pub error: ExecError,
}

/// Outcome of running a whole program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of lines that executed successfully.
    pub executed: usize,
    /// Lines that failed, in program order.
    pub errors: Vec<LineError>,
}

impl RunSummary {
    /// Returns true if every instruction executed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Console streams used by [`run_program`].
pub struct Console<'a> {
    /// Operator input and output.
    pub port: &'a mut dyn IoPort,
    /// Echoed lines and state tables.
    pub display: &'a mut dyn Write,
    /// Per-instruction diagnostics.
    pub diagnostics: &'a mut dyn Write,
}

/// Runs every line of `source` against `state`.
///
/// Blank lines are skipped without advancing the program counter. A failing
/// line is reported as `line N: error: ...` on the diagnostics stream and
/// the run continues with the next line.
///
/// # Errors
///
/// Returns [`RunError::Console`] if the display or diagnostics stream
/// fails.
pub fn run_program(
    source: &str,
    state: &mut MachineState,
    config: RunConfig,
    console: &mut Console<'_>,
) -> Result<RunSummary, RunError> {
    let mut summary = RunSummary::default();

    for line in source_lines(source) {
        let tokens = line.tokens();
        if tokens.is_empty() {
            log::debug!("skipping blank line {}", line.file_line);
            continue;
        }

        if config.display {
            writeln!(console.display, "{}", line.text)?;
        }

        match step_one(state, &tokens, &mut *console.port) {
            Ok(instruction) => {
                log::info!("pc {}: {instruction}", state.pc());
                summary.executed += 1;
            }
            Err(error) => {
                log::warn!(
                    "line {} failed ({:?}): {error}",
                    line.file_line,
                    error.class()
                );
                writeln!(console.diagnostics, "line {}: error: {error}", state.pc())?;
                summary.errors.push(LineError {
                    pc: state.pc(),
                    file_line: line.file_line,
                    error,
                });
            }
        }

        if config.display {
            render_state(console.display, state)?;
            writeln!(console.display)?;
        }

        state.end_cycle();
    }

    Ok(summary)
}

/// [`IoPort`] backed by a line-oriented reader and a writer.
pub struct ConsolePort<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePort<R, W> {
    /// Creates a port that prompts on `output` and reads from `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl ConsolePort<io::StdinLock<'static>, io::Stdout> {
    /// Creates a port over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

fn transport(error: &io::Error) -> PortError {
    PortError::Transport {
        message: error.to_string(),
    }
}

impl<R: BufRead, W: Write> IoPort for ConsolePort<R, W> {
    fn read_input(&mut self) -> Result<i64, PortError> {
        write!(self.output, "User input => ").map_err(|e| transport(&e))?;
        self.output.flush().map_err(|e| transport(&e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| transport(&e))?;
        if read == 0 {
            return Err(PortError::InputClosed);
        }

        let text = line.trim();
        text.parse().map_err(|_| PortError::InvalidInput {
            text: text.to_string(),
        })
    }

    fn write_output(&mut self, value: i64) -> Result<(), PortError> {
        writeln!(self.output, "Output screen: {value}").map_err(|e| transport(&e))
    }
}
