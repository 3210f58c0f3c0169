// Execution engine for the tape interpreter

use crate::interpreter::constants::{DEFAULT_MAX_OPERATIONS, DEFAULT_TAPE_SIZE};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::instruction::Instruction;
use crate::memory::tape::Tape;
use tracing::{debug, trace};

/// Run limits for one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    /// Initial tape length, also the size of every growth block
    pub initial_tape_size: usize,
    /// Ceiling on consumed characters, skip scans included
    pub max_operations: u64,
}

impl ExecConfig {
    pub fn new(initial_tape_size: usize, max_operations: u64) -> Self {
        ExecConfig {
            initial_tape_size,
            max_operations,
        }
    }

    fn validate(&self) -> Result<(), RuntimeError> {
        if self.initial_tape_size == 0 {
            return Err(RuntimeError::InvalidConfig {
                message: "initial tape size must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        ExecConfig::new(DEFAULT_TAPE_SIZE, DEFAULT_MAX_OPERATIONS)
    }
}

/// Result of a single [`Interpreter::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction was executed; more may follow
    Continue,
    /// The instruction pointer is at the end of the program; nothing ran
    Halted,
}

/// Executes one program against its own tape
///
/// Every piece of state lives here and dies with the value, so two
/// interpreters never share anything.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// Program characters, indexed by the instruction pointer
    pub(crate) program: Vec<char>,

    pub(crate) tape: Tape,

    pub(crate) instruction_pointer: usize,

    /// Positions of `[` entered with a nonzero cell
    pub(crate) loop_stack: Vec<usize>,

    pub(crate) output: Vec<char>,

    pub(crate) operations: u64,

    pub(crate) max_operations: u64,
}

impl Interpreter {
    /// Create an interpreter for `program` with a fresh tape
    pub fn new(program: &str, config: &ExecConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        Ok(Interpreter {
            program: program.chars().collect(),
            tape: Tape::new(config.initial_tape_size),
            instruction_pointer: 0,
            loop_stack: Vec::new(),
            output: Vec::new(),
            operations: 0,
            max_operations: config.max_operations,
        })
    }

    /// Run the program to completion and return everything it printed
    pub fn run(mut self) -> Result<String, RuntimeError> {
        debug!(
            len = self.program.len(),
            max_operations = self.max_operations,
            "starting run"
        );

        loop {
            match self.step() {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Halted) => break,
                Err(e) => {
                    debug!(operations = self.operations, error = %e, "run faulted");
                    return Err(e);
                }
            }
        }

        debug!(
            operations = self.operations,
            tape_len = self.tape.len(),
            "run complete"
        );
        Ok(self.output.into_iter().collect())
    }

    /// Execute the instruction under the instruction pointer
    pub fn step(&mut self) -> Result<StepOutcome, RuntimeError> {
        if self.is_halted() {
            return Ok(StepOutcome::Halted);
        }

        self.charge_operation()?;

        let position = self.instruction_pointer;
        match Instruction::from_char(self.program[position]) {
            Some(Instruction::Right) => {
                if self.tape.move_right() {
                    trace!(
                        len = self.tape.len(),
                        block = self.tape.block_size(),
                        "tape grew"
                    );
                }
            }
            Some(Instruction::Left) => self.tape.move_left(position)?,
            Some(Instruction::Increment) => self.tape.increment(),
            Some(Instruction::Decrement) => self.tape.decrement(),
            Some(Instruction::Output) => self.output.push(char::from(self.tape.current())),
            Some(Instruction::LoopOpen) => self.execute_loop_open()?,
            Some(Instruction::LoopClose) => self.execute_loop_close()?,
            None => {}
        }

        self.instruction_pointer += 1;
        Ok(StepOutcome::Continue)
    }

    /// Count one consumed character against the budget.
    ///
    /// The check happens before the increment, so a run faults as soon as
    /// the counter has reached the ceiling and another character is due.
    pub(crate) fn charge_operation(&mut self) -> Result<(), RuntimeError> {
        if self.operations >= self.max_operations {
            return Err(RuntimeError::OperationLimit {
                limit: self.max_operations,
            });
        }
        self.operations += 1;
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.instruction_pointer >= self.program.len()
    }

    pub fn program(&self) -> &[char] {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn data_pointer(&self) -> usize {
        self.tape.pointer()
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn loop_stack(&self) -> &[usize] {
        &self.loop_stack
    }

    /// Characters emitted so far
    pub fn output(&self) -> &[char] {
        &self.output
    }

    pub fn operations(&self) -> u64 {
        self.operations
    }

    pub fn max_operations(&self) -> u64 {
        self.max_operations
    }
}

/// Execute `program` on a fresh tape and return its output.
///
/// Convenience wrapper around [`Interpreter::new`] and [`Interpreter::run`].
pub fn execute(
    program: &str,
    initial_tape_size: usize,
    max_operations: u64,
) -> Result<String, RuntimeError> {
    Interpreter::new(program, &ExecConfig::new(initial_tape_size, max_operations))?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program_produces_nothing() {
        assert_eq!(execute("", 1, 1).unwrap(), "");
        assert_eq!(execute("", 10, 0).unwrap(), "");
    }

    #[test]
    fn increments_and_prints() {
        assert_eq!(execute("+.", 1, 10).unwrap(), "\u{1}");
    }

    #[test]
    fn decrement_wraps_to_255() {
        assert_eq!(execute("-.", 1, 10).unwrap(), "\u{ff}");
    }

    #[test]
    fn zero_tape_size_is_rejected() {
        let err = Interpreter::new("+", &ExecConfig::new(0, 10)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidConfig { .. }));
    }

    #[test]
    fn step_reports_halt_without_charging() {
        let mut interpreter = Interpreter::new("+", &ExecConfig::default()).unwrap();
        assert_eq!(interpreter.step().unwrap(), StepOutcome::Continue);
        assert_eq!(interpreter.operations(), 1);
        assert_eq!(interpreter.step().unwrap(), StepOutcome::Halted);
        assert_eq!(interpreter.operations(), 1);
    }

    #[test]
    fn non_instructions_consume_operations() {
        let mut interpreter = Interpreter::new("ab,c", &ExecConfig::default()).unwrap();
        while interpreter.step().unwrap() == StepOutcome::Continue {}
        assert_eq!(interpreter.operations(), 4);
        assert!(interpreter.output().is_empty());
    }

    #[test]
    fn instruction_pointer_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8 but one instruction slot
        assert_eq!(execute("é+.", 1, 10).unwrap(), "\u{1}");
    }
}
