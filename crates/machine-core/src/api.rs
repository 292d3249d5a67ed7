//! Public host-facing API contracts for embedding the machine.

use thiserror::Error;

use crate::{ExecError, Flags, Memory, Register, RegisterFile};

/// Value the program counter holds before the first cycle is reported.
pub const INITIAL_PC: u32 = 1;

/// Complete host-visible machine state.
///
/// The state is single-owner and is mutated only by the execute stage (and
/// by the host when it closes a reporting cycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    registers: RegisterFile,
    memory: Memory,
    flags: Flags,
    pc: u32,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            registers: RegisterFile::default(),
            memory: Memory::default(),
            flags: Flags::default(),
            pc: INITIAL_PC,
        }
    }
}

impl MachineState {
    /// Returns the register file.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Reads a register.
    #[must_use]
    pub const fn register(&self, reg: Register) -> u8 {
        self.registers.get(reg)
    }

    /// Reads a register by its source name.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidRegister`] when `name` is not one of `R0..R6`.
    pub fn register_by_name(&self, name: &str) -> Result<u8, ExecError> {
        self.registers.get_by_name(name)
    }

    /// Writes a register.
    pub const fn set_register(&mut self, reg: Register, value: u8) {
        self.registers.set(reg, value);
    }

    /// Returns data memory.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns mutable data memory.
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Returns the current flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Raises flags on top of the current ones.
    pub const fn raise_flags(&mut self, flags: Flags) {
        self.flags.raise(flags);
    }

    /// Lowers all flags.
    pub const fn clear_flags(&mut self) {
        self.flags.clear();
    }

    /// Returns the display program counter.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Closes a reporting cycle: flags are cleared and the program counter
    /// advances. Call once the state of the current instruction was shown.
    pub const fn end_cycle(&mut self) {
        self.flags.clear();
        self.pc = self.pc.saturating_add(1);
    }

    /// Restores power-on state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Host port failure categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum PortError {
    /// Input stream reached end of file.
    #[error("input stream closed")]
    InputClosed,
    /// Operator supplied something that is not a decimal integer.
    #[error("input `{text}` is not a decimal integer")]
    InvalidInput {
        /// Text as entered.
        text: String,
    },
    /// Underlying host transport failed.
    #[error("port transport failed: {message}")]
    Transport {
        /// Host error description.
        message: String,
    },
}

/// Operator-facing input/output port consumed by `IN` and `OUT`.
pub trait IoPort {
    /// Blocks until the operator supplies a decimal integer.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when no integer can be obtained.
    fn read_input(&mut self) -> Result<i64, PortError>;

    /// Reports a value to the operator.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the host cannot deliver the value.
    fn write_output(&mut self, value: i64) -> Result<(), PortError>;
}
