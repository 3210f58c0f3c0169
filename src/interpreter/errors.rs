//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], every way a run can fail. All faults
//! are terminal: they abort the run and discard any output produced so far.

use thiserror::Error;

/// Faults raised while executing a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `<` executed while the data pointer was already at cell 0
    #[error("Data pointer moved below cell 0 at instruction {position}")]
    NegativePointer { position: usize },

    /// The operation counter reached the configured ceiling
    #[error("Exceeded maximum operations limit of {limit}")]
    OperationLimit { limit: u64 },

    /// A zero-cell skip ran off the end of the program looking for `]`
    #[error("Unmatched '[' at instruction {position}")]
    UnmatchedBracket { position: usize },

    /// `]` executed with no open loop on the return stack
    #[error("Unbalanced ']' at instruction {position}")]
    UnbalancedLoopClose { position: usize },

    /// Rejected configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Snapshot history limit exceeded while recording a debug session
    #[error("Snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl RuntimeError {
    /// Instruction position the fault is attributed to, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            RuntimeError::NegativePointer { position }
            | RuntimeError::UnmatchedBracket { position }
            | RuntimeError::UnbalancedLoopClose { position } => Some(*position),
            RuntimeError::OperationLimit { .. }
            | RuntimeError::InvalidConfig { .. }
            | RuntimeError::SnapshotLimitExceeded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = RuntimeError::OperationLimit { limit: 10 };
        assert_eq!(err.to_string(), "Exceeded maximum operations limit of 10");

        let err = RuntimeError::UnmatchedBracket { position: 3 };
        assert_eq!(err.to_string(), "Unmatched '[' at instruction 3");
    }

    #[test]
    fn position_only_for_located_faults() {
        assert_eq!(RuntimeError::NegativePointer { position: 2 }.position(), Some(2));
        assert_eq!(RuntimeError::OperationLimit { limit: 1 }.position(), None);
    }
}
