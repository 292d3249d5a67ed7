//! Address legality checks for the flat data memory.

use crate::ExecError;

use super::MEMORY_SIZE;

/// Validates an architectural address and converts it into a cell index.
///
/// Addresses are signed at the source level (`-1` is a legal literal), so the
/// check is done on the widened value rather than after a lossy cast.
///
/// # Errors
///
/// Returns [`ExecError::OutOfBounds`] when `address` is outside `0..64`.
pub fn validate_address(address: i64) -> Result<usize, ExecError> {
    usize::try_from(address)
        .ok()
        .filter(|index| *index < MEMORY_SIZE)
        .ok_or(ExecError::OutOfBounds { address })
}
