// src/exec/runner.rs

//! Pluggable tool runner abstraction.
//!
//! Tasks talk to a `ToolRunner` instead of spawning processes directly, so a
//! fake runner can record invocations and hand back scripted exit codes in
//! tests while [`ProcessRunner`] does the real work in production.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::ToolInvocation;

/// Trait abstracting how external tools are run.
///
/// Implementations resolve to the tool's exit code. `Err` means the tool
/// could not be run at all (e.g. missing binary); callers decide whether that
/// counts as a failure or is fatal.
pub trait ToolRunner: Send {
    fn invoke(
        &mut self,
        invocation: ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>>;
}

/// Runs tools as child processes of this one.
///
/// Stdout and stderr are inherited, so tool output reaches the terminal
/// untouched. Every child runs in the project root and blocks the caller
/// until it exits.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    root: PathBuf,
    bin_dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(root: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bin_dir: bin_dir.into(),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.root(), cfg.resolve(&cfg.tools.bin_dir))
    }
}

impl ToolRunner for ProcessRunner {
    fn invoke(
        &mut self,
        invocation: ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        Box::pin(async move {
            let program = resolve_program(&self.bin_dir, &invocation.program);
            info!(program = ?program, args = ?invocation.args, "starting tool process");

            let status = Command::new(&program)
                .args(&invocation.args)
                .current_dir(&self.root)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .with_context(|| format!("running '{}'", invocation.program))?;

            let code = status.code().unwrap_or(-1);
            debug!(
                program = %invocation.program,
                exit_code = code,
                success = status.success(),
                "tool process exited"
            );
            Ok(code)
        })
    }
}

/// Prefer a project-local copy of `program` from `bin_dir`; fall back to
/// letting the OS search `PATH`.
///
/// Names containing a path separator are returned unchanged.
pub fn resolve_program(bin_dir: &Path, program: &str) -> PathBuf {
    if program.contains('/') || program.contains('\\') {
        return PathBuf::from(program);
    }

    let local = bin_dir.join(program);
    if local.is_file() {
        return local;
    }

    if cfg!(windows) {
        let cmd = bin_dir.join(format!("{program}.cmd"));
        if cmd.is_file() {
            return cmd;
        }
    }

    PathBuf::from(program)
}
