use thiserror::Error;

use crate::api::PortError;

/// Error classes used for diagnostics aggregation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Instruction record could not be turned into an instruction.
    Decode,
    /// An operand did not resolve to a register, literal, or memory reference.
    Operand,
    /// Memory access outside the data memory.
    Memory,
    /// Arithmetic precondition violated.
    Arithmetic,
    /// Host input/output port failure.
    Io,
}

/// Recoverable per-instruction execution error.
///
/// Every variant aborts only the current instruction; the machine state is
/// left exactly as it was before the instruction started.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ExecError {
    /// Mnemonic is not part of the instruction set.
    #[error("invalid instruction `{mnemonic}`")]
    InvalidInstruction {
        /// Mnemonic as written.
        mnemonic: String,
    },
    /// Instruction record carried the wrong number of operands.
    #[error("`{mnemonic}` expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Mnemonic as written.
        mnemonic: &'static str,
        /// Operand count required by the instruction.
        expected: usize,
        /// Operand count present in the record.
        found: usize,
    },
    /// Name does not denote one of `R0..R6`.
    #[error("invalid register `{name}`")]
    InvalidRegister {
        /// Token as written.
        name: String,
    },
    /// Destination operand is not a register.
    #[error("invalid destination register `{name}`")]
    InvalidDestination {
        /// Token as written.
        name: String,
    },
    /// Bracketed operand is not of the form `[Rn]`.
    #[error("invalid memory reference `{token}`")]
    InvalidMemoryReference {
        /// Token as written.
        token: String,
    },
    /// Operand is not a decimal integer literal.
    #[error("invalid numeric literal `{token}`")]
    InvalidLiteral {
        /// Token as written.
        token: String,
    },
    /// Memory address outside `0..64`.
    #[error("memory address {address} out of bounds")]
    OutOfBounds {
        /// Effective address that was rejected.
        address: i64,
    },
    /// Rotate/shift amount below zero.
    #[error("invalid shift amount {amount}")]
    InvalidShiftAmount {
        /// Resolved amount.
        amount: i64,
    },
    /// `DIV` with a source operand of zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Host port failed while servicing `IN`/`OUT`.
    #[error(transparent)]
    Io(#[from] PortError),
}

impl ExecError {
    /// Returns the diagnostics class for this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInstruction { .. } | Self::OperandCount { .. } => ErrorClass::Decode,
            Self::InvalidRegister { .. }
            | Self::InvalidDestination { .. }
            | Self::InvalidMemoryReference { .. }
            | Self::InvalidLiteral { .. }
            | Self::InvalidShiftAmount { .. } => ErrorClass::Operand,
            Self::OutOfBounds { .. } => ErrorClass::Memory,
            Self::DivisionByZero => ErrorClass::Arithmetic,
            Self::Io(_) => ErrorClass::Io,
        }
    }
}
