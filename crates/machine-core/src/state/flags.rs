use std::fmt;

/// Condition flags raised by the most recent numeric-producing instruction.
///
/// Flags are a per-cycle signal: instructions only ever set bits, and the
/// host clears them once the state has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags {
    /// Carry (`CF`).
    pub carry: bool,
    /// Overflow (`OF`).
    pub overflow: bool,
    /// Underflow (`UF`).
    pub underflow: bool,
    /// Zero (`ZF`).
    pub zero: bool,
}

impl Flags {
    /// Display labels in report order.
    pub const LABELS: [&'static str; 4] = ["CF", "OF", "UF", "ZF"];

    /// Returns the flags as `[CF, OF, UF, ZF]`.
    #[must_use]
    pub const fn bits(self) -> [bool; 4] {
        [self.carry, self.overflow, self.underflow, self.zero]
    }

    /// Returns `true` when no flag is raised.
    #[must_use]
    pub const fn is_clear(self) -> bool {
        !(self.carry || self.overflow || self.underflow || self.zero)
    }

    /// Raises every flag that is set in `other`.
    pub const fn raise(&mut self, other: Self) {
        self.carry |= other.carry;
        self.overflow |= other.overflow;
        self.underflow |= other.underflow;
        self.zero |= other.zero;
    }

    /// Lowers all flags.
    pub const fn clear(&mut self) {
        *self = Self {
            carry: false,
            overflow: false,
            underflow: false,
            zero: false,
        };
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, set) in Self::LABELS.iter().zip(self.bits()) {
            if set {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(label)?;
                first = false;
            }
        }
        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}
