use std::fmt;
use std::str::FromStr;

use crate::ExecError;

/// Instruction families sharing one execution routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum InstructionFamily {
    Move,
    Arithmetic,
    IncDec,
    RotateShift,
    Input,
    Output,
    Store,
    Load,
}

/// Closed set of source mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Mov,
    Add,
    Sub,
    Mul,
    Div,
    Inc,
    Dec,
    Rol,
    Ror,
    Shl,
    Shr,
    In,
    Out,
    Store,
    Load,
}

/// Canonical `(name, mnemonic, operand count)` table.
pub const MNEMONIC_TABLE: &[(&str, Mnemonic, usize)] = &[
    ("MOV", Mnemonic::Mov, 2),
    ("ADD", Mnemonic::Add, 2),
    ("SUB", Mnemonic::Sub, 2),
    ("MUL", Mnemonic::Mul, 2),
    ("DIV", Mnemonic::Div, 2),
    ("INC", Mnemonic::Inc, 1),
    ("DEC", Mnemonic::Dec, 1),
    ("ROL", Mnemonic::Rol, 2),
    ("ROR", Mnemonic::Ror, 2),
    ("SHL", Mnemonic::Shl, 2),
    ("SHR", Mnemonic::Shr, 2),
    ("IN", Mnemonic::In, 1),
    ("OUT", Mnemonic::Out, 1),
    ("STORE", Mnemonic::Store, 2),
    ("LOAD", Mnemonic::Load, 2),
];

impl Mnemonic {
    /// Returns the upper-case source spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Store => "STORE",
            Self::Load => "LOAD",
        }
    }

    /// Number of operand tokens the instruction takes.
    #[must_use]
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Inc | Self::Dec | Self::In | Self::Out => 1,
            Self::Mov
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Rol
            | Self::Ror
            | Self::Shl
            | Self::Shr
            | Self::Store
            | Self::Load => 2,
        }
    }

    /// Returns the execution family for this mnemonic.
    #[must_use]
    pub const fn family(self) -> InstructionFamily {
        match self {
            Self::Mov => InstructionFamily::Move,
            Self::Add | Self::Sub | Self::Mul | Self::Div => InstructionFamily::Arithmetic,
            Self::Inc | Self::Dec => InstructionFamily::IncDec,
            Self::Rol | Self::Ror | Self::Shl | Self::Shr => InstructionFamily::RotateShift,
            Self::In => InstructionFamily::Input,
            Self::Out => InstructionFamily::Output,
            Self::Store => InstructionFamily::Store,
            Self::Load => InstructionFamily::Load,
        }
    }
}

impl FromStr for Mnemonic {
    type Err = ExecError;

    /// Mnemonics are case-sensitive: `mov` is not `MOV`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        MNEMONIC_TABLE
            .iter()
            .find(|(name, _, _)| *name == token)
            .map(|(_, mnemonic, _)| *mnemonic)
            .ok_or_else(|| ExecError::InvalidInstruction {
                mnemonic: token.to_string(),
            })
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
