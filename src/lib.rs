// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod tasks;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::exec::ProcessRunner;
use crate::fs::RealFileSystem;
use crate::tasks::{planned_invocations, TaskOutcome, TaskRunner};
use crate::types::TaskName;

/// High-level entry point used by `main.rs`.
///
/// Loads the config (or the built-in defaults), then runs the selected task
/// with real processes and the real filesystem.
pub async fn run(args: CliArgs) -> Result<TaskOutcome> {
    let cfg = load_or_default(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg, args.task, &args.extra);
        return Ok(TaskOutcome::Success);
    }

    let runner = ProcessRunner::from_config(&cfg);
    let mut tasks = TaskRunner::new(cfg, Arc::new(RealFileSystem), runner);
    let outcome = tasks.run(args.task, &args.extra).await?;
    Ok(outcome)
}

/// Simple dry-run output: print the resolved layout and the tool calls.
fn print_dry_run(cfg: &ConfigFile, task: TaskName, extra_flags: &[String]) {
    println!("taskmake dry-run: {task}");
    println!("  root = {}", cfg.root().display());
    println!("  temp_dir = {}", cfg.temp_dir().display());
    println!("  build_dir = {}", cfg.build_dir().display());
    println!("  docs_dir = {}", cfg.docs_dir().display());
    println!();

    match task {
        TaskName::Docs => {
            println!(
                "would copy {} into {}",
                cfg.readme().display(),
                cfg.docs_dir().display()
            );
        }
        _ => {
            let invocations = planned_invocations(cfg, task, extra_flags);
            println!("invocations ({}):", invocations.len());
            for invocation in invocations {
                println!("  - {invocation}");
            }
        }
    }

    debug!("dry-run complete (no execution)");
}
