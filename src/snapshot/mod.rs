// Snapshot management for stepping through a recorded run

use crate::interpreter::engine::Interpreter;

/// Snapshot of interpreter state between two steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub cells: Vec<u8>,
    pub data_pointer: usize,
    pub instruction_pointer: usize,
    pub loop_stack: Vec<usize>,
    pub output: String,
    pub operations: u64,
}

impl Snapshot {
    /// Capture the current state of `interpreter`
    pub fn capture(interpreter: &Interpreter) -> Self {
        Snapshot {
            cells: interpreter.tape().cells().to_vec(),
            data_pointer: interpreter.data_pointer(),
            instruction_pointer: interpreter.instruction_pointer(),
            loop_stack: interpreter.loop_stack().to_vec(),
            output: interpreter.output().iter().collect(),
            operations: interpreter.operations(),
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.cells.len()
            + self.loop_stack.len() * std::mem::size_of::<usize>()
            + self.output.len()
    }

    /// Output split into display lines
    pub fn output_lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.output.split('\n').collect();
        // Remove trailing empty string if output ended with newline
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

/// Bounded list of snapshots
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history.
    ///
    /// On failure returns the memory that would have been in use.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), usize> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(self.current_memory + snapshot_size);
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::ExecConfig;

    #[test]
    fn capture_copies_state() {
        let mut interpreter = Interpreter::new("+>+.", &ExecConfig::new(2, 100)).unwrap();
        for _ in 0..4 {
            interpreter.step().unwrap();
        }
        let snapshot = Snapshot::capture(&interpreter);
        assert_eq!(snapshot.cells, vec![1, 1]);
        assert_eq!(snapshot.data_pointer, 1);
        assert_eq!(snapshot.instruction_pointer, 4);
        assert_eq!(snapshot.output, "\u{1}");
        assert_eq!(snapshot.operations, 4);
    }

    #[test]
    fn manager_enforces_limit() {
        let interpreter = Interpreter::new("", &ExecConfig::default()).unwrap();
        let snapshot = Snapshot::capture(&interpreter);
        let size = snapshot.estimated_size();

        let mut manager = SnapshotManager::new(size * 2);
        assert!(manager.push(snapshot.clone()).is_ok());
        assert!(manager.push(snapshot.clone()).is_ok());
        assert_eq!(manager.push(snapshot), Err(size * 3));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), size * 2);
    }

    #[test]
    fn output_lines_drop_trailing_newline() {
        let snapshot = Snapshot {
            cells: vec![0],
            data_pointer: 0,
            instruction_pointer: 0,
            loop_stack: Vec::new(),
            output: "ab\ncd\n".to_string(),
            operations: 0,
        };
        assert_eq!(snapshot.output_lines(), vec!["ab", "cd"]);
    }
}
