//! Helper functions for instruction execution.

use crate::decoder::{AddressOperand, Operand};
use crate::{ExecError, MachineState};

/// Resolves a value operand against the current state.
///
/// # Errors
///
/// Returns [`ExecError::OutOfBounds`] when an indirect operand addresses a
/// cell outside data memory.
pub fn resolve_operand(operand: Operand, state: &MachineState) -> Result<i64, ExecError> {
    match operand {
        Operand::Register(reg) => Ok(i64::from(state.register(reg))),
        Operand::Indirect(reg) => {
            let address = i64::from(state.register(reg));
            state.memory().read(address).map(i64::from)
        }
        Operand::Literal(value) => Ok(value),
    }
}

/// Computes the effective address of a `STORE`/`LOAD` operand.
///
/// The result is not bounds-checked; memory access does that.
#[must_use]
pub fn compute_effective_address(operand: AddressOperand, state: &MachineState) -> i64 {
    match operand {
        AddressOperand::Direct(address) => address,
        AddressOperand::Indirect(reg) => i64::from(state.register(reg)),
    }
}
