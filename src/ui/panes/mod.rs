//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: program text with instruction coloring and the current position
//! - [`tape`]: tape cells, data pointer, operation count and loop stack
//! - [`output`]: characters printed so far
//! - [`status`]: status bar with keybindings and execution state
//! - `utils`: shared block styling and scroll helpers
//!
//! Each pane module exports a `render_*` function that draws from a
//! [`Snapshot`](crate::snapshot::Snapshot) and never mutates interpreter state.

mod utils;

pub mod output;
pub mod program;
pub mod status;
pub mod tape;

// Re-export render functions for convenience
pub use output::render_output_pane;
pub use program::{render_program_pane, ProgramScrollState};
pub use status::render_status_bar;
pub use tape::{render_tape_pane, TapeScrollState};
