//! Instruction decode: token records into typed instructions.
//!
//! Decoding is purely syntactic. It checks the mnemonic, the operand count,
//! and the shape of every operand, but reads no machine state; value
//! resolution happens in the execute stage.

use std::fmt;

use crate::encoding::{InstructionFamily, Mnemonic};
use crate::{ExecError, Register};

/// A value operand: register, indirect memory reference, or literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Current value of a register.
    Register(Register),
    /// Memory cell addressed by the current value of a register (`[Rn]`).
    Indirect(Register),
    /// Decimal literal.
    Literal(i64),
}

impl Operand {
    /// Parses a value operand token.
    ///
    /// Tokens starting with `R` are always register names and tokens starting
    /// with `[` are always memory references; anything else must be a decimal
    /// literal.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidRegister`], [`ExecError::InvalidMemoryReference`]
    /// or [`ExecError::InvalidLiteral`] depending on the token shape.
    pub fn parse(token: &str) -> Result<Self, ExecError> {
        if token.starts_with('[') {
            return parse_indirect(token).map(Self::Indirect);
        }
        if token.starts_with('R') {
            return token.parse().map(Self::Register);
        }
        parse_literal(token).map(Self::Literal)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{reg}"),
            Self::Indirect(reg) => write!(f, "[{reg}]"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// Memory address operand used by `STORE` and `LOAD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressOperand {
    /// Bare decimal address.
    Direct(i64),
    /// Address held in a register (`[Rn]`).
    Indirect(Register),
}

impl AddressOperand {
    /// Parses an address operand token.
    ///
    /// # Errors
    ///
    /// Bare register names are rejected with [`ExecError::InvalidMemoryReference`];
    /// malformed brackets and literals fail as in [`Operand::parse`].
    pub fn parse(token: &str) -> Result<Self, ExecError> {
        if token.starts_with('[') {
            return parse_indirect(token).map(Self::Indirect);
        }
        if token.starts_with('R') {
            return Err(ExecError::InvalidMemoryReference {
                token: token.to_string(),
            });
        }
        parse_literal(token).map(Self::Direct)
    }
}

impl fmt::Display for AddressOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(address) => write!(f, "{address}"),
            Self::Indirect(reg) => write!(f, "[{reg}]"),
        }
    }
}

/// Binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Unit increment/decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StepOp {
    Inc,
    Dec,
}

/// Bit rotation or shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BitOp {
    Rol,
    Ror,
    Shl,
    Shr,
}

/// A fully decoded instruction. Every mnemonic maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `MOV src, dst`.
    Mov {
        /// Value source.
        src: Operand,
        /// Destination register.
        dst: Register,
    },
    /// `ADD|SUB|MUL|DIV src, dst`, computing `dst = dst op src`.
    Arithmetic {
        /// Operation.
        op: ArithmeticOp,
        /// Right-hand operand.
        src: Operand,
        /// Left-hand operand and destination.
        dst: Register,
    },
    /// `INC|DEC reg`.
    IncDec {
        /// Operation.
        op: StepOp,
        /// Register updated in place.
        reg: Register,
    },
    /// `ROL|ROR|SHL|SHR reg, amount`.
    RotateShift {
        /// Operation.
        op: BitOp,
        /// Register updated in place.
        reg: Register,
        /// Number of bit positions.
        amount: Operand,
    },
    /// `IN reg`.
    In {
        /// Destination register.
        dst: Register,
    },
    /// `OUT src`.
    Out {
        /// Value reported to the host.
        src: Operand,
    },
    /// `STORE src, dst`.
    Store {
        /// Register whose value is written.
        src: Register,
        /// Target memory cell.
        dst: AddressOperand,
    },
    /// `LOAD dst, src`.
    Load {
        /// Destination register.
        dst: Register,
        /// Source memory cell.
        src: AddressOperand,
    },
}

impl Instruction {
    /// Returns the mnemonic this instruction was decoded from.
    #[must_use]
    pub const fn mnemonic(&self) -> Mnemonic {
        match self {
            Self::Mov { .. } => Mnemonic::Mov,
            Self::Arithmetic { op, .. } => match op {
                ArithmeticOp::Add => Mnemonic::Add,
                ArithmeticOp::Sub => Mnemonic::Sub,
                ArithmeticOp::Mul => Mnemonic::Mul,
                ArithmeticOp::Div => Mnemonic::Div,
            },
            Self::IncDec { op, .. } => match op {
                StepOp::Inc => Mnemonic::Inc,
                StepOp::Dec => Mnemonic::Dec,
            },
            Self::RotateShift { op, .. } => match op {
                BitOp::Rol => Mnemonic::Rol,
                BitOp::Ror => Mnemonic::Ror,
                BitOp::Shl => Mnemonic::Shl,
                BitOp::Shr => Mnemonic::Shr,
            },
            Self::In { .. } => Mnemonic::In,
            Self::Out { .. } => Mnemonic::Out,
            Self::Store { .. } => Mnemonic::Store,
            Self::Load { .. } => Mnemonic::Load,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Self::Mov { src, dst } | Self::Arithmetic { src, dst, .. } => {
                write!(f, "{mnemonic} {src}, {dst}")
            }
            Self::IncDec { reg, .. } => write!(f, "{mnemonic} {reg}"),
            Self::RotateShift { reg, amount, .. } => write!(f, "{mnemonic} {reg}, {amount}"),
            Self::In { dst } => write!(f, "{mnemonic} {dst}"),
            Self::Out { src } => write!(f, "{mnemonic} {src}"),
            Self::Store { src, dst } => write!(f, "{mnemonic} {src}, {dst}"),
            Self::Load { dst, src } => write!(f, "{mnemonic} {dst}, {src}"),
        }
    }
}

/// Stateless instruction decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Decodes one instruction record (`tokens[0]` is the mnemonic).
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidInstruction`] for an unknown or missing
    /// mnemonic, [`ExecError::OperandCount`] when the operand list has the wrong
    /// length, and the operand errors of [`Operand::parse`] /
    /// [`AddressOperand::parse`] otherwise. Destination operands are checked
    /// before sources.
    pub fn decode<S: AsRef<str>>(tokens: &[S]) -> Result<Instruction, ExecError> {
        let Some((head, operands)) = tokens.split_first() else {
            return Err(ExecError::InvalidInstruction {
                mnemonic: String::new(),
            });
        };
        let mnemonic: Mnemonic = head.as_ref().parse()?;

        let operands: Vec<&str> = operands.iter().map(|token| token.as_ref()).collect();
        if operands.len() != mnemonic.operand_count() {
            return Err(ExecError::OperandCount {
                mnemonic: mnemonic.name(),
                expected: mnemonic.operand_count(),
                found: operands.len(),
            });
        }

        let instruction = match mnemonic.family() {
            InstructionFamily::Move => {
                let dst = parse_destination(operands[1])?;
                Instruction::Mov {
                    src: Operand::parse(operands[0])?,
                    dst,
                }
            }
            InstructionFamily::Arithmetic => {
                let dst = parse_destination(operands[1])?;
                let op = match mnemonic {
                    Mnemonic::Add => ArithmeticOp::Add,
                    Mnemonic::Sub => ArithmeticOp::Sub,
                    Mnemonic::Mul => ArithmeticOp::Mul,
                    _ => ArithmeticOp::Div,
                };
                Instruction::Arithmetic {
                    op,
                    src: Operand::parse(operands[0])?,
                    dst,
                }
            }
            InstructionFamily::IncDec => Instruction::IncDec {
                op: if mnemonic == Mnemonic::Inc {
                    StepOp::Inc
                } else {
                    StepOp::Dec
                },
                reg: operands[0].parse()?,
            },
            InstructionFamily::RotateShift => {
                let op = match mnemonic {
                    Mnemonic::Rol => BitOp::Rol,
                    Mnemonic::Ror => BitOp::Ror,
                    Mnemonic::Shl => BitOp::Shl,
                    _ => BitOp::Shr,
                };
                Instruction::RotateShift {
                    op,
                    reg: operands[0].parse()?,
                    amount: Operand::parse(operands[1])?,
                }
            }
            InstructionFamily::Input => Instruction::In {
                dst: operands[0].parse()?,
            },
            InstructionFamily::Output => Instruction::Out {
                src: Operand::parse(operands[0])?,
            },
            InstructionFamily::Store => Instruction::Store {
                src: operands[0].parse()?,
                dst: AddressOperand::parse(operands[1])?,
            },
            InstructionFamily::Load => {
                let dst = parse_destination(operands[0])?;
                Instruction::Load {
                    dst,
                    src: AddressOperand::parse(operands[1])?,
                }
            }
        };

        log::debug!("decoded {instruction}");
        Ok(instruction)
    }
}

fn parse_destination(token: &str) -> Result<Register, ExecError> {
    token
        .parse()
        .map_err(|_| ExecError::InvalidDestination {
            name: token.to_string(),
        })
}

fn parse_indirect(token: &str) -> Result<Register, ExecError> {
    let invalid = || ExecError::InvalidMemoryReference {
        token: token.to_string(),
    };

    let inner = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;

    if inner.starts_with('R') {
        inner.parse()
    } else {
        Err(invalid())
    }
}

fn parse_literal(token: &str) -> Result<i64, ExecError> {
    token.parse().map_err(|_| ExecError::InvalidLiteral {
        token: token.to_string(),
    })
}
