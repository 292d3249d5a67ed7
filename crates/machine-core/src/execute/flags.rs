//! FLAGS update behaviors and the saturation policy.

use crate::Flags;

/// Describes how FLAGS should be updated after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// No change to FLAGS.
    #[default]
    None,
    /// Raise the given flags; flags already set stay set.
    Raise(Flags),
}

/// Register value and flag update produced by the saturation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saturated {
    /// Value to commit to the destination register.
    pub value: u8,
    /// Flags raised by the commit.
    pub flags: FlagsUpdate,
}

/// Coerces a signed intermediate result into the 8-bit register domain.
///
/// - `result > 255` commits `0` and raises `CF`, `OF` and `ZF`.
/// - `result < 0` commits `255` and raises `UF` only.
/// - `result == 0` commits `0` and raises `ZF` only.
/// - anything else commits unchanged with no flags.
#[must_use]
pub fn saturate(result: i64) -> Saturated {
    let (value, flags) = match u8::try_from(result) {
        Ok(0) => (
            0,
            Flags {
                zero: true,
                ..Flags::default()
            },
        ),
        Ok(value) => (value, Flags::default()),
        Err(_) if result < 0 => (
            u8::MAX,
            Flags {
                underflow: true,
                ..Flags::default()
            },
        ),
        Err(_) => (
            0,
            Flags {
                carry: true,
                overflow: true,
                underflow: false,
                zero: true,
            },
        ),
    };

    Saturated {
        value,
        flags: if flags.is_clear() {
            FlagsUpdate::None
        } else {
            FlagsUpdate::Raise(flags)
        },
    }
}
