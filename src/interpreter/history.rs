//! Recorded execution history for the debugger.
//!
//! [`History::record`] runs a program to completion (or fault) up front,
//! capturing a [`Snapshot`] before the first step and after every step. The
//! UI then moves a cursor over those snapshots instead of re-executing.

use crate::interpreter::engine::{ExecConfig, Interpreter, StepOutcome};
use crate::interpreter::errors::RuntimeError;
use crate::snapshot::{Snapshot, SnapshotManager};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct History {
    program: String,
    snapshots: SnapshotManager,
    position: usize,
    outcome: Result<String, RuntimeError>,
}

impl History {
    /// Execute `program` and keep a snapshot of every intermediate state.
    ///
    /// Only an invalid configuration fails here. Runtime faults and running
    /// out of snapshot memory end the recording early and are reported by
    /// [`History::outcome`].
    pub fn record(
        program: &str,
        config: &ExecConfig,
        snapshot_limit: usize,
    ) -> Result<Self, RuntimeError> {
        let mut interpreter = Interpreter::new(program, config)?;
        let mut snapshots = SnapshotManager::new(snapshot_limit);

        let outcome: Result<String, RuntimeError> = match Self::push(&mut snapshots, &interpreter) {
            Err(e) => Err(e),
            Ok(()) => loop {
                match interpreter.step() {
                    Ok(StepOutcome::Continue) => {
                        if let Err(e) = Self::push(&mut snapshots, &interpreter) {
                            break Err(e);
                        }
                    }
                    Ok(StepOutcome::Halted) => break Ok(interpreter.output().iter().collect()),
                    Err(e) => break Err(e),
                }
            },
        };

        debug!(
            snapshots = snapshots.len(),
            memory = snapshots.memory_usage(),
            ok = outcome.is_ok(),
            "recorded history"
        );

        Ok(History {
            program: program.to_string(),
            snapshots,
            position: 0,
            outcome,
        })
    }

    fn push(snapshots: &mut SnapshotManager, interpreter: &Interpreter) -> Result<(), RuntimeError> {
        let limit = snapshots.memory_limit();
        snapshots
            .push(Snapshot::capture(interpreter))
            .map_err(|current| {
                warn!(current, limit, "snapshot limit reached");
                RuntimeError::SnapshotLimitExceeded { current, limit }
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// How the recorded run ended
    pub fn outcome(&self) -> &Result<String, RuntimeError> {
        &self.outcome
    }

    /// Snapshot under the cursor; `None` only if not even the initial
    /// state fit in the snapshot limit
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.snapshots.len()
    }

    /// Move one snapshot forward. Returns `false` at the end.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Move one snapshot back. Returns `false` at the start.
    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.snapshots.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_snapshot_per_step_plus_initial() {
        let history = History::record("++.", &ExecConfig::default(), usize::MAX).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.outcome(), &Ok("\u{2}".to_string()));
        assert_eq!(history.current().unwrap().operations, 0);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut history = History::record("+-", &ExecConfig::default(), usize::MAX).unwrap();
        assert!(!history.step_backward());
        assert!(history.step_forward());
        assert_eq!(history.current().unwrap().cells[0], 1);
        assert!(history.step_forward());
        assert!(!history.step_forward());
        assert!(history.is_at_end());
        history.rewind_to_start();
        assert_eq!(history.position(), 0);
        history.jump_to_end();
        assert_eq!(history.position(), 2);
    }

    #[test]
    fn fault_keeps_states_before_it() {
        let history = History::record("+<", &ExecConfig::default(), usize::MAX).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.outcome(),
            &Err(RuntimeError::NegativePointer { position: 1 })
        );
    }

    #[test]
    fn snapshot_limit_stops_recording() {
        let history = History::record("++++", &ExecConfig::default(), 1).unwrap();
        assert!(history.is_empty());
        assert!(matches!(
            history.outcome(),
            Err(RuntimeError::SnapshotLimitExceeded { limit: 1, .. })
        ));
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(History::record("+", &ExecConfig::new(0, 1), usize::MAX).is_err());
    }
}
