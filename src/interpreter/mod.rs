//! Tape interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`engine::Interpreter`] state machine and [`engine::execute`]
//! - [`jumps`]: loop entry, exit and the zero-cell skip scan
//! - [`instruction`]: the recognised symbols
//! - [`errors`]: runtime fault types
//! - [`history`]: recorded runs for the step-through debugger
//!
//! # Execution Model
//!
//! There is no parse phase. The engine walks the raw program one character
//! at a time, charging each consumed character to the operation budget
//! before applying it. Characters that are not instructions still cost one
//! operation.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod history;
pub mod instruction;
mod jumps;
