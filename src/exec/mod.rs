// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] describes a single tool call.
//! - [`runner`] provides the `ToolRunner` trait and the production
//!   `ProcessRunner`, which tests replace with a fake implementation.

pub mod invocation;
pub mod runner;

pub use invocation::ToolInvocation;
pub use runner::{resolve_program, ProcessRunner, ToolRunner};
