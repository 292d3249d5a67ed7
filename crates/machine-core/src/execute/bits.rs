//! Bit-vector helpers for the rotate/shift family.
//!
//! Register values are expanded into a little-endian bit vector (index 0 is
//! the least significant bit), moved, and folded back into an integer.

/// Width of a register in bits.
pub const REGISTER_BITS: usize = 8;

/// Little-endian bit vector of a register value.
pub type BitVector = [bool; REGISTER_BITS];

/// Expands `value` into its little-endian bit vector.
#[must_use]
pub fn to_bits(value: u8) -> BitVector {
    std::array::from_fn(|position| (value >> position) & 1 == 1)
}

/// Folds a little-endian bit vector back into an integer.
#[must_use]
pub fn from_bits(bits: &BitVector) -> u8 {
    bits.iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .fold(0_u8, |acc, (position, _)| acc | (1_u8 << position))
}

/// Circular rotation towards the most significant bit.
#[must_use]
pub fn rotate_left(bits: &BitVector, amount: usize) -> BitVector {
    let amount = amount % REGISTER_BITS;
    std::array::from_fn(|position| bits[(position + REGISTER_BITS - amount) % REGISTER_BITS])
}

/// Circular rotation towards the least significant bit.
#[must_use]
pub fn rotate_right(bits: &BitVector, amount: usize) -> BitVector {
    let amount = amount % REGISTER_BITS;
    std::array::from_fn(|position| bits[(position + amount) % REGISTER_BITS])
}

/// Shift towards the most significant bit; vacated bits are zero-filled.
#[must_use]
pub fn shift_left(bits: &BitVector, amount: usize) -> BitVector {
    std::array::from_fn(|position| position.checked_sub(amount).is_some_and(|from| bits[from]))
}

/// Shift towards the least significant bit; vacated bits are zero-filled.
#[must_use]
pub fn shift_right(bits: &BitVector, amount: usize) -> BitVector {
    std::array::from_fn(|position| {
        position
            .checked_add(amount)
            .filter(|from| *from < REGISTER_BITS)
            .is_some_and(|from| bits[from])
    })
}
