// src/tasks/test_suite.rs

//! `test`: one coverage-wrapped test runner invocation.

use tracing::warn;

use crate::config::ConfigFile;
use crate::exec::{ToolInvocation, ToolRunner};
use crate::tasks::{FailureCounter, TaskOutcome, TaskRunner};

/// `<coverage> <test runner> --color --reporter <r> --timeout <ms> <tests...>`
pub fn test_invocation(cfg: &ConfigFile) -> ToolInvocation {
    ToolInvocation::new(&cfg.tools.coverage)
        .arg(&cfg.tools.test_runner)
        .arg("--color")
        .args(["--reporter", cfg.test.reporter.as_str()])
        .arg("--timeout")
        .arg(cfg.test.timeout_ms.to_string())
        .args(cfg.groups.tests.iter().cloned())
}

impl<R: ToolRunner> TaskRunner<R> {
    /// Run the test suite once under coverage. Does not lint.
    pub async fn test(&mut self) -> TaskOutcome {
        let mut failures = FailureCounter::new();

        let code = self.run_tool(test_invocation(&self.config)).await;
        if failures.record(code) {
            warn!(exit_code = code, "test run failed");
        }

        failures.into_outcome()
    }
}
