// src/tasks/lint.rs

//! `lint`: run the linter over every file group, never stopping early.

use tracing::{info, warn};

use crate::config::{ConfigFile, FileGroup};
use crate::exec::{ToolInvocation, ToolRunner};
use crate::tasks::{FailureCounter, TaskOutcome, TaskRunner};

/// Build the linter invocation for each file group, in visiting order.
///
/// Each invocation is `<linter> <group patterns...> <extra flags...>`.
pub fn lint_invocations(
    cfg: &ConfigFile,
    extra_flags: &[String],
) -> Vec<(FileGroup, ToolInvocation)> {
    cfg.lint_groups()
        .into_iter()
        .map(|group| {
            let invocation = ToolInvocation::new(&cfg.tools.linter)
                .args(group.patterns.iter().cloned())
                .args(extra_flags.iter().cloned());
            (group, invocation)
        })
        .collect()
}

impl<R: ToolRunner> TaskRunner<R> {
    /// Lint all four file groups.
    ///
    /// Every group is attempted even after a failure; the outcome is
    /// `Failed` if any linter run exited nonzero or could not be started.
    pub async fn lint(&mut self, extra_flags: &[String]) -> TaskOutcome {
        let mut failures = FailureCounter::new();

        for (group, invocation) in lint_invocations(&self.config, extra_flags) {
            self.progress(&group.progress_message());

            let code = self.run_tool(invocation).await;
            if failures.record(code) {
                warn!(group = group.name, exit_code = code, "lint group failed");
            }
        }

        info!(failures = failures.count(), "lint finished");
        failures.into_outcome()
    }
}
