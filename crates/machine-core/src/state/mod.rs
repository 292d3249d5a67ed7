//! Architectural machine state primitives.

/// Condition flag set.
pub mod flags;
/// Register identifiers and the fixed register file.
pub mod registers;

pub use flags::Flags;
pub use registers::{Register, RegisterFile, REGISTER_COUNT};
