//! Memory model for the interpreter
//!
//! A run owns a single [`tape::Tape`]: a zero-filled `u8` buffer that grows
//! to the right in fixed-size blocks and carries the data pointer. Cells wrap
//! modulo 256 and the pointer may never move left of cell 0.

pub mod tape;
