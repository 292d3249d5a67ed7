use std::fmt;
use std::str::FromStr;

use crate::ExecError;

/// Number of architecturally visible general-purpose registers (`R0..R6`).
pub const REGISTER_COUNT: usize = 7;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
}

impl Register {
    /// Ordered list of all architectural registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
    ];

    /// Returns the array index for this register (`0..=6`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps a register number onto an architectural register.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            _ => None,
        }
    }

    /// Returns the canonical source name (`"R0"`..`"R6"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::R0 => "R0",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
            Self::R6 => "R6",
        }
    }
}

impl FromStr for Register {
    type Err = ExecError;

    /// Parses an exact, case-sensitive register name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.name() == name)
            .ok_or_else(|| ExecError::InvalidRegister {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size register file; every slot is an 8-bit unsigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterFile {
    slots: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// Reads a register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> u8 {
        self.slots[reg.index()]
    }

    /// Writes a register.
    pub const fn set(&mut self, reg: Register, value: u8) {
        self.slots[reg.index()] = value;
    }

    /// Looks up a register value by its source name.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::InvalidRegister`] when `name` is not one of `R0..R6`.
    pub fn get_by_name(&self, name: &str) -> Result<u8, ExecError> {
        name.parse::<Register>().map(|reg| self.get(reg))
    }

    /// Returns all register values in `R0..R6` order.
    #[must_use]
    pub const fn values(&self) -> [u8; REGISTER_COUNT] {
        self.slots
    }
}
