//! # Introduction
//!
//! bfart runs programs written in the eight-symbol tape language and turns
//! what they print into colorized text art. Programs can be written by hand
//! or generated from plain text, and any run can be stepped through in a
//! terminal debugger.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Generator → Program → Interpreter → Output → Art grid → HTML
//! ```
//!
//! 1. [`generator`]: builds a program that prints a given text.
//! 2. [`interpreter`]: executes a program directly from its characters
//!    under an operation budget, returning the output or a typed fault.
//! 3. [`memory`]: the growable byte [`memory::tape::Tape`].
//! 4. [`art`]: lays output characters over a grid of background colors.
//! 5. [`render`]: computes readable foregrounds and writes an HTML document.
//! 6. [`snapshot`] and [`interpreter::history`]: per-step state captured
//!    for the debugger.
//! 7. [`ui`]: ratatui-based step-through debugger; not part of the stable
//!    library API.
//!
//! ## Instruction set
//!
//! `>` `<` move the data pointer, `+` `-` change the current cell (wrapping),
//! `.` prints the cell as a character, `[` `]` loop while the cell is
//! nonzero. Every other character is a no-op that still costs one operation.

pub mod art;
pub mod generator;
pub mod interpreter;
pub mod memory;
pub mod render;
pub mod snapshot;
pub mod ui;

pub use interpreter::engine::{execute, ExecConfig, Interpreter};
pub use interpreter::errors::RuntimeError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=bfart=debug` or `RUST_LOG=bfart=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
