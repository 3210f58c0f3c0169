//! Growable byte tape
//!
//! The tape starts with `block_size` zeroed cells and appends another
//! `block_size` zeroed cells whenever the data pointer steps past the end.
//! It never shrinks. Cell arithmetic wraps modulo 256.

use crate::interpreter::errors::RuntimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    block_size: usize,
    pointer: usize,
}

impl Tape {
    /// Create a tape with one zeroed block.
    ///
    /// `block_size` must be nonzero; the engine validates this before
    /// constructing a tape.
    pub fn new(block_size: usize) -> Self {
        Tape {
            cells: vec![0; block_size],
            block_size,
            pointer: 0,
        }
    }

    /// Advance the data pointer, appending a zeroed block if it runs off the end.
    ///
    /// Returns `true` when the tape grew.
    pub fn move_right(&mut self) -> bool {
        self.pointer += 1;
        if self.pointer >= self.cells.len() {
            self.cells.resize(self.cells.len() + self.block_size, 0);
            return true;
        }
        false
    }

    /// Retreat the data pointer. Fails at index 0 without moving.
    ///
    /// `position` is the instruction pointer, used only for the error.
    pub fn move_left(&mut self, position: usize) -> Result<(), RuntimeError> {
        if self.pointer == 0 {
            return Err(RuntimeError::NegativePointer { position });
        }
        self.pointer -= 1;
        Ok(())
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Value of the cell under the data pointer
    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_with_one_block() {
        let tape = Tape::new(4);
        assert_eq!(tape.cells(), &[0, 0, 0, 0]);
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn grows_by_one_block_past_the_end() {
        let mut tape = Tape::new(2);
        assert_eq!(tape.block_size(), 2);
        assert!(!tape.move_right());
        assert!(tape.move_right());
        assert_eq!(tape.len(), 2 * tape.block_size());
        assert_eq!(tape.pointer(), 2);
        assert!(!tape.move_right());
        assert!(tape.move_right());
        assert_eq!(tape.len(), 6);
    }

    #[test]
    fn never_shrinks_when_moving_back() {
        let mut tape = Tape::new(1);
        tape.move_right();
        tape.move_right();
        tape.move_left(0).unwrap();
        tape.move_left(0).unwrap();
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn move_left_at_zero_faults() {
        let mut tape = Tape::new(3);
        let err = tape.move_left(7).unwrap_err();
        assert!(matches!(err, RuntimeError::NegativePointer { position: 7 }));
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn cells_wrap() {
        let mut tape = Tape::new(1);
        tape.decrement();
        assert_eq!(tape.current(), 255);
        tape.increment();
        assert_eq!(tape.current(), 0);
    }
}
