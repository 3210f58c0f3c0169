//! Loop entry and exit.
//!
//! Brackets are matched dynamically: `[` either pushes its own position on
//! the loop-return stack or scans forward to its partner, and `]` either
//! jumps back to the recorded `[` or pops it. No jump table is built, so every
//! character a skip passes over is charged to the operation budget exactly as
//! if it had been executed.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use tracing::trace;

impl Interpreter {
    /// `[`: enter the loop, or skip to the matching `]` when the cell is zero.
    pub(crate) fn execute_loop_open(&mut self) -> Result<(), RuntimeError> {
        if self.tape.current() != 0 {
            self.loop_stack.push(self.instruction_pointer);
            return Ok(());
        }
        self.skip_loop()
    }

    /// `]`: jump back while the cell is nonzero, otherwise leave the loop.
    ///
    /// The instruction pointer is set to the `[` itself; the engine's
    /// post-step advance then lands on the first instruction of the body.
    pub(crate) fn execute_loop_close(&mut self) -> Result<(), RuntimeError> {
        let position = self.instruction_pointer;
        if self.tape.current() != 0 {
            let &open = self
                .loop_stack
                .last()
                .ok_or(RuntimeError::UnbalancedLoopClose { position })?;
            self.instruction_pointer = open;
        } else {
            self.loop_stack
                .pop()
                .ok_or(RuntimeError::UnbalancedLoopClose { position })?;
        }
        Ok(())
    }

    /// Scan forward from the current `[` to its partner, leaving the
    /// instruction pointer on that `]`.
    fn skip_loop(&mut self) -> Result<(), RuntimeError> {
        let open = self.instruction_pointer;
        let mut depth = 1usize;

        while depth != 0 {
            self.instruction_pointer += 1;
            let Some(&c) = self.program.get(self.instruction_pointer) else {
                return Err(RuntimeError::UnmatchedBracket { position: open });
            };
            self.charge_operation()?;
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
        }

        trace!(
            from = open,
            to = self.instruction_pointer,
            "skipped loop body"
        );
        Ok(())
    }
}
