// src/tasks/mod.rs

//! Task handlers and dispatch.
//!
//! - [`lint`] runs the linter over each file group without short-circuiting.
//! - [`test_suite`] runs the coverage-wrapped test runner once.
//! - [`docs`] syncs the README into the docs directory.
//! - [`browserify`] stages sources, runs the bundler and cleans up.
//! - [`failures`] holds the per-task failure counter and the outcome type.
//!
//! Every handler owns its own `FailureCounter`; nothing carries over between
//! task runs, so one `TaskRunner` can run tasks repeatedly.

pub mod browserify;
pub mod docs;
pub mod failures;
pub mod lint;
pub mod test_suite;

use std::io::Write;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::{ToolInvocation, ToolRunner};
use crate::fs::FileSystem;
use crate::types::TaskName;

pub use browserify::{bundle_invocation, ScratchLayout};
pub use failures::{FailureCounter, TaskOutcome};
pub use lint::lint_invocations;
pub use test_suite::test_invocation;

/// Runs named tasks against one project configuration.
pub struct TaskRunner<R: ToolRunner> {
    config: ConfigFile,
    fs: Arc<dyn FileSystem>,
    runner: R,
    progress: Box<dyn Write + Send>,
}

impl<R: ToolRunner> TaskRunner<R> {
    pub fn new(config: ConfigFile, fs: Arc<dyn FileSystem>, runner: R) -> Self {
        Self {
            config,
            fs,
            runner,
            progress: Box::new(std::io::stdout()),
        }
    }

    /// Send progress lines somewhere other than stdout.
    pub fn with_progress_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.progress = Box::new(writer);
        self
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Run one task to completion.
    ///
    /// `extra_flags` only reach the linter. `all` runs `test`.
    pub async fn run(&mut self, task: TaskName, extra_flags: &[String]) -> Result<TaskOutcome> {
        info!(task = %task, "running task");

        let outcome = match task {
            TaskName::All | TaskName::Test => self.test().await,
            TaskName::Lint => self.lint(extra_flags).await,
            TaskName::Docs => self.docs()?,
            TaskName::Browserify => self.browserify().await?,
        };

        info!(task = %task, success = outcome.is_success(), "task finished");
        Ok(outcome)
    }

    /// Print one progress line for operators, flushed before the next tool
    /// starts so it precedes that tool's output.
    fn progress(&mut self, line: &str) {
        let written = writeln!(self.progress, "{line}").and_then(|()| self.progress.flush());
        if let Err(err) = written {
            warn!(error = %err, "failed to write progress message");
        }
    }

    /// Run a tool and return its exit code. A tool that cannot be started
    /// reports `-1`, which the caller counts like any other failure.
    async fn run_tool(&mut self, invocation: ToolInvocation) -> i32 {
        let program = invocation.program.clone();
        match self.runner.invoke(invocation).await {
            Ok(code) => code,
            Err(err) => {
                error!(program = %program, error = %err, "tool execution error");
                -1
            }
        }
    }
}

/// Tool invocations `task` would make, in order. Used by `--dry-run`.
pub fn planned_invocations(
    cfg: &ConfigFile,
    task: TaskName,
    extra_flags: &[String],
) -> Vec<ToolInvocation> {
    match task {
        TaskName::All | TaskName::Test => vec![test_invocation(cfg)],
        TaskName::Lint => lint_invocations(cfg, extra_flags)
            .into_iter()
            .map(|(_, invocation)| invocation)
            .collect(),
        TaskName::Docs => Vec::new(),
        TaskName::Browserify => vec![bundle_invocation(cfg, &ScratchLayout::from_config(cfg))],
    }
}
