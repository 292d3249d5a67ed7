//! Core execution engine for the register machine.

/// Flat 64-cell data memory.
pub mod memory;
pub use memory::{validate_address, Memory, MEMORY_ROW_CELLS, MEMORY_SIZE};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{IoPort, MachineState, PortError, INITIAL_PC};

/// Architectural machine state primitives.
pub mod state;
pub use state::{Flags, Register, RegisterFile, REGISTER_COUNT};

/// Mnemonic table and instruction families.
pub mod encoding;
pub use encoding::{InstructionFamily, Mnemonic, MNEMONIC_TABLE};

/// Instruction decode from token records.
pub mod decoder;
pub use decoder::{
    AddressOperand, ArithmeticOp, BitOp, Decoder, Instruction, Operand, StepOp,
};

/// Error taxonomy for per-instruction failures.
pub mod fault;
pub use fault::{ErrorClass, ExecError};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{
    commit_execution, execute_instruction, saturate, step_one, ExecuteState, FlagsUpdate,
    Saturated,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
