//! Flat byte-addressable data memory.

/// Bounds checks for architectural addresses.
pub mod access;

pub use access::validate_address;

use crate::ExecError;

/// Number of byte cells in data memory.
pub const MEMORY_SIZE: usize = 64;

/// Cells rendered per row by state displays and reports.
pub const MEMORY_ROW_CELLS: usize = 8;

/// Fixed 64-cell data memory. Every access is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }
}

impl Memory {
    /// Reads the cell at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::OutOfBounds`] when `address` is outside `0..64`.
    pub fn read(&self, address: i64) -> Result<u8, ExecError> {
        validate_address(address).map(|index| self.cells[index])
    }

    /// Writes `value` into the cell at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::OutOfBounds`] when `address` is outside `0..64`.
    pub fn write(&mut self, address: i64, value: u8) -> Result<(), ExecError> {
        let index = validate_address(address)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Returns all cells in address order.
    #[must_use]
    pub const fn cells(&self) -> &[u8; MEMORY_SIZE] {
        &self.cells
    }

    /// Iterates over memory in display rows of [`MEMORY_ROW_CELLS`] cells.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(MEMORY_ROW_CELLS)
    }
}

#[cfg(test)]
mod tests {
    use super::{Memory, MEMORY_ROW_CELLS, MEMORY_SIZE};
    use crate::ExecError;

    #[test]
    fn fresh_memory_is_zeroed() {
        let memory = Memory::default();
        assert_eq!(memory.cells().len(), MEMORY_SIZE);
        assert!(memory.cells().iter().all(|cell| *cell == 0));
    }

    #[test]
    fn write_then_read_hits_the_same_cell() {
        let mut memory = Memory::default();
        memory.write(10, 42).expect("address 10 is in range");

        assert_eq!(memory.read(10), Ok(42));
        assert_eq!(memory.read(11), Ok(0));
    }

    #[test]
    fn out_of_range_write_leaves_memory_untouched() {
        let mut memory = Memory::default();

        assert_eq!(
            memory.write(64, 1),
            Err(ExecError::OutOfBounds { address: 64 })
        );
        assert_eq!(memory, Memory::default());
    }

    #[test]
    fn rows_cover_memory_in_eight_cell_chunks() {
        let mut memory = Memory::default();
        memory.write(63, 7).expect("last cell is in range");

        let rows: Vec<&[u8]> = memory.rows().collect();
        assert_eq!(rows.len(), MEMORY_SIZE / MEMORY_ROW_CELLS);
        assert!(rows.iter().all(|row| row.len() == MEMORY_ROW_CELLS));
        assert_eq!(rows[7][7], 7);
    }
}
