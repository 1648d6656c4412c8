// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::TaskName;

/// Command-line arguments for `taskmake`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskmake",
    version,
    about = "Run the project's lint, test, docs and bundle tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run.
    #[arg(value_enum, default_value_t = TaskName::All)]
    pub task: TaskName,

    /// Extra flags forwarded verbatim to every linter invocation.
    ///
    /// Everything after the task name lands here, including values that start
    /// with a hyphen (e.g. `taskmake lint --fix`).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "EXTRA")]
    pub extra: Vec<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Taskmake.toml` in the current working directory. A missing
    /// file means the built-in project layout is used.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKMAKE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the invocations the task would make, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
