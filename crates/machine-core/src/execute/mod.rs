//! Instruction execution pipeline.
//!
//! Every instruction runs in two phases:
//! 1. Execute: resolve operands, validate preconditions, compute the result,
//!    and record the pending side effects in an [`ExecuteState`].
//! 2. Commit: apply the memory write, destination register, and FLAGS.
//!
//! An instruction that fails in phase 1 leaves the machine state untouched.

mod bits;
mod flags;
mod helpers;

pub use bits::{
    from_bits, rotate_left, rotate_right, shift_left, shift_right, to_bits, BitVector,
    REGISTER_BITS,
};
pub use flags::{saturate, FlagsUpdate, Saturated};
pub use helpers::{compute_effective_address, resolve_operand};

use crate::decoder::{AddressOperand, ArithmeticOp, BitOp, Decoder, Instruction, Operand, StepOp};
use crate::{validate_address, ExecError, IoPort, MachineState, Register};

/// Side effects accumulated by the execute phase, applied by
/// [`commit_execution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteState {
    /// Destination register and its new value.
    pub dest: Option<(Register, u8)>,
    /// Memory cell and the value to write into it.
    pub memory_write: Option<(i64, u8)>,
    /// FLAGS update to apply.
    pub flags_update: FlagsUpdate,
    /// Value handed to the output port, if any.
    pub output: Option<i64>,
}

impl ExecuteState {
    fn saturated(dest: Register, result: i64) -> Self {
        let Saturated { value, flags } = saturate(result);
        Self {
            dest: Some((dest, value)),
            flags_update: flags,
            ..Self::default()
        }
    }
}

/// Executes one decoded instruction without mutating `state`.
///
/// `IN` and `OUT` talk to `port` during this phase; neither leaves anything
/// half-applied in the machine state when the port fails.
///
/// # Errors
///
/// Returns the [`ExecError`] that aborted the instruction.
pub fn execute_instruction(
    instr: &Instruction,
    state: &MachineState,
    port: &mut dyn IoPort,
) -> Result<ExecuteState, ExecError> {
    match *instr {
        Instruction::Mov { src, dst } => execute_mov(src, dst, state),
        Instruction::Arithmetic { op, src, dst } => execute_arithmetic(op, src, dst, state),
        Instruction::IncDec { op, reg } => Ok(execute_inc_dec(op, reg, state)),
        Instruction::RotateShift { op, reg, amount } => {
            execute_rotate_shift(op, reg, amount, state)
        }
        Instruction::In { dst } => execute_in(dst, port),
        Instruction::Out { src } => execute_out(src, state, port),
        Instruction::Store { src, dst } => execute_store(src, dst, state),
        Instruction::Load { dst, src } => execute_load(dst, src, state),
    }
}

/// Applies the committed side effects from execution to the machine state.
///
/// # Errors
///
/// Returns [`ExecError::OutOfBounds`] if the pending memory write targets an
/// invalid cell. The write is attempted first, so nothing else is applied.
pub fn commit_execution(state: &mut MachineState, exec: &ExecuteState) -> Result<(), ExecError> {
    if let Some((address, value)) = exec.memory_write {
        state.memory_mut().write(address, value)?;
        log::trace!("commit memory[{address}] = {value}");
    }

    if let Some((reg, value)) = exec.dest {
        state.set_register(reg, value);
        log::trace!("commit {reg} = {value}");
    }

    if let FlagsUpdate::Raise(flags) = exec.flags_update {
        state.raise_flags(flags);
        log::trace!("commit flags {flags}");
    }

    Ok(())
}

/// Decodes, executes, and commits one instruction record.
///
/// Flags raised by the instruction stay visible until the host calls
/// [`MachineState::end_cycle`].
///
/// # Errors
///
/// Returns the decode or execute error; the state is unchanged in that case.
pub fn step_one<S: AsRef<str>>(
    state: &mut MachineState,
    tokens: &[S],
    port: &mut dyn IoPort,
) -> Result<Instruction, ExecError> {
    let instruction = Decoder::decode(tokens)?;
    let exec = execute_instruction(&instruction, state, port)?;
    commit_execution(state, &exec)?;
    Ok(instruction)
}

fn execute_mov(
    src: Operand,
    dst: Register,
    state: &MachineState,
) -> Result<ExecuteState, ExecError> {
    let value = resolve_operand(src, state)?;
    Ok(ExecuteState::saturated(dst, value))
}

fn execute_arithmetic(
    op: ArithmeticOp,
    src: Operand,
    dst: Register,
    state: &MachineState,
) -> Result<ExecuteState, ExecError> {
    let lhs = i64::from(state.register(dst));
    let rhs = resolve_operand(src, state)?;

    let result = match op {
        ArithmeticOp::Add => lhs.saturating_add(rhs),
        ArithmeticOp::Sub => lhs.saturating_sub(rhs),
        ArithmeticOp::Mul => lhs.saturating_mul(rhs),
        ArithmeticOp::Div => lhs.checked_div(rhs).ok_or(ExecError::DivisionByZero)?,
    };

    Ok(ExecuteState::saturated(dst, result))
}

fn execute_inc_dec(op: StepOp, reg: Register, state: &MachineState) -> ExecuteState {
    let current = i64::from(state.register(reg));
    let result = match op {
        StepOp::Inc => current + 1,
        StepOp::Dec => current - 1,
    };
    ExecuteState::saturated(reg, result)
}

fn execute_rotate_shift(
    op: BitOp,
    reg: Register,
    amount: Operand,
    state: &MachineState,
) -> Result<ExecuteState, ExecError> {
    let amount = resolve_operand(amount, state)?;
    if amount < 0 {
        return Err(ExecError::InvalidShiftAmount { amount });
    }
    // Anything past usize::MAX shifts the whole register out anyway.
    let positions = usize::try_from(amount).unwrap_or(usize::MAX);

    let bits = to_bits(state.register(reg));
    let moved = match op {
        BitOp::Rol => rotate_left(&bits, positions),
        BitOp::Ror => rotate_right(&bits, positions),
        BitOp::Shl => shift_left(&bits, positions),
        BitOp::Shr => shift_right(&bits, positions),
    };

    Ok(ExecuteState::saturated(reg, i64::from(from_bits(&moved))))
}

fn execute_in(dst: Register, port: &mut dyn IoPort) -> Result<ExecuteState, ExecError> {
    let value = port.read_input()?;
    Ok(ExecuteState::saturated(dst, value))
}

fn execute_out(
    src: Operand,
    state: &MachineState,
    port: &mut dyn IoPort,
) -> Result<ExecuteState, ExecError> {
    let value = resolve_operand(src, state)?;
    port.write_output(value)?;
    Ok(ExecuteState {
        output: Some(value),
        ..ExecuteState::default()
    })
}

fn execute_store(
    src: Register,
    dst: AddressOperand,
    state: &MachineState,
) -> Result<ExecuteState, ExecError> {
    let address = compute_effective_address(dst, state);
    validate_address(address)?;

    Ok(ExecuteState {
        memory_write: Some((address, state.register(src))),
        ..ExecuteState::default()
    })
}

// LOAD deliberately bypasses the saturation policy: memory cells are already
// 8-bit, and no flags are raised.
fn execute_load(
    dst: Register,
    src: AddressOperand,
    state: &MachineState,
) -> Result<ExecuteState, ExecError> {
    let address = compute_effective_address(src, state);
    let value = state.memory().read(address)?;

    Ok(ExecuteState {
        dest: Some((dst, value)),
        ..ExecuteState::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Flags, PortError};

    #[derive(Default)]
    struct StubPort {
        input: Option<i64>,
        written: Vec<i64>,
    }

    impl IoPort for StubPort {
        fn read_input(&mut self) -> Result<i64, PortError> {
            self.input.take().ok_or(PortError::InputClosed)
        }

        fn write_output(&mut self, value: i64) -> Result<(), PortError> {
            self.written.push(value);
            Ok(())
        }
    }

    fn decode(tokens: &[&str]) -> Instruction {
        Decoder::decode(tokens).expect("should decode")
    }

    #[test]
    fn execute_phase_does_not_touch_state() {
        let state = MachineState::default();
        let mut port = StubPort::default();

        let exec = execute_instruction(&decode(&["MOV", "7", "R3"]), &state, &mut port)
            .expect("mov should execute");

        assert_eq!(exec.dest, Some((Register::R3, 7)));
        assert_eq!(exec.flags_update, FlagsUpdate::None);
        assert_eq!(state, MachineState::default());
    }

    #[test]
    fn add_overflow_records_saturated_result_and_flags() {
        let mut state = MachineState::default();
        state.set_register(Register::R0, 200);
        let mut port = StubPort::default();

        let exec = execute_instruction(&decode(&["ADD", "56", "R0"]), &state, &mut port)
            .expect("add should execute");

        assert_eq!(exec.dest, Some((Register::R0, 0)));
        assert_eq!(
            exec.flags_update,
            FlagsUpdate::Raise(Flags {
                carry: true,
                overflow: true,
                underflow: false,
                zero: true,
            })
        );
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let mut state = MachineState::default();
        state.set_register(Register::R0, 10);
        let mut port = StubPort::default();

        assert_eq!(
            execute_instruction(&decode(&["DIV", "R1", "R0"]), &state, &mut port),
            Err(ExecError::DivisionByZero)
        );
    }

    #[test]
    fn store_records_pending_write_only() {
        let mut state = MachineState::default();
        state.set_register(Register::R1, 9);
        let mut port = StubPort::default();

        let exec = execute_instruction(&decode(&["STORE", "R1", "12"]), &state, &mut port)
            .expect("store should execute");

        assert_eq!(exec.memory_write, Some((12, 9)));
        assert_eq!(exec.dest, None);
        assert_eq!(state.memory().read(12), Ok(0));
    }

    #[test]
    fn commit_applies_all_pending_effects() {
        let mut state = MachineState::default();
        let exec = ExecuteState {
            dest: Some((Register::R2, 5)),
            memory_write: Some((1, 6)),
            flags_update: FlagsUpdate::Raise(Flags {
                zero: true,
                ..Flags::default()
            }),
            output: None,
        };

        commit_execution(&mut state, &exec).expect("commit should succeed");

        assert_eq!(state.register(Register::R2), 5);
        assert_eq!(state.memory().read(1), Ok(6));
        assert!(state.flags().zero);
    }

    #[test]
    fn in_and_out_use_the_port() {
        let mut state = MachineState::default();
        let mut port = StubPort {
            input: Some(300),
            ..StubPort::default()
        };

        step_one(&mut state, &["IN", "R4"], &mut port).expect("in should execute");
        assert_eq!(state.register(Register::R4), 0);
        assert!(state.flags().carry);

        step_one(&mut state, &["OUT", "77"], &mut port).expect("out should execute");
        assert_eq!(port.written, vec![77]);

        assert_eq!(
            step_one(&mut state, &["IN", "R4"], &mut port),
            Err(ExecError::Io(PortError::InputClosed))
        );
    }

    #[test]
    fn step_one_rejects_unknown_mnemonic_without_side_effects() {
        let mut state = MachineState::default();
        let mut port = StubPort::default();

        assert_eq!(
            step_one(&mut state, &["NOP"], &mut port),
            Err(ExecError::InvalidInstruction {
                mnemonic: "NOP".into()
            })
        );
        assert_eq!(state, MachineState::default());
    }
}
