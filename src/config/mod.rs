// src/config/mod.rs

//! Configuration loading and validation for taskmake.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate globs, tool names and limits (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_root_dir, default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    BundleSection, ConfigFile, FileGroup, GroupsSection, PathsSection, RawConfigFile,
    TestSection, ToolsSection,
};
pub use validate::validate_config;
