// src/tasks/failures.rs

//! Per-task failure accounting.

/// Counts failed tool invocations within one task run.
///
/// Starts at zero, only ever goes up, and is consumed into a [`TaskOutcome`]
/// once every invocation of the task has been attempted.
#[derive(Debug, Default)]
pub struct FailureCounter {
    failures: usize,
}

impl FailureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exit code. Returns `true` if it counted as a failure.
    pub fn record(&mut self, exit_code: i32) -> bool {
        if exit_code != 0 {
            self.failures += 1;
            true
        } else {
            false
        }
    }

    pub fn count(&self) -> usize {
        self.failures
    }

    pub fn into_outcome(self) -> TaskOutcome {
        if self.failures == 0 {
            TaskOutcome::Success
        } else {
            TaskOutcome::Failed {
                failures: self.failures,
            }
        }
    }
}

/// Final result of a task, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed { failures: usize },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }

    /// 0 on success, 1 however many invocations failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskOutcome::Success => 0,
            TaskOutcome::Failed { .. } => 1,
        }
    }
}
