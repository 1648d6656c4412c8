// src/config/validate.rs

use std::path::{Component, Path, PathBuf};

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskmakeError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskmakeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Check the raw config for problems that would only surface mid-task.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_paths(cfg)?;
    validate_groups(cfg)?;
    validate_tools(cfg)?;
    validate_test_section(cfg)?;
    validate_bundle_section(cfg)?;
    Ok(())
}

/// The temp dir is removed recursively after every `browserify` run, so it
/// must be a relative subdirectory that shares no files with the project.
fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let temp = &cfg.paths.temp_dir;
    let normalized: PathBuf = temp
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        return Err(TaskmakeError::ConfigError(format!(
            "[paths].temp_dir must name a subdirectory of the project (got {:?})",
            temp
        )));
    }
    if temp
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(TaskmakeError::ConfigError(format!(
            "[paths].temp_dir must be relative and must not contain `..` (got {:?})",
            temp
        )));
    }

    let others: [(&str, &Path); 6] = [
        ("[bundle].source_dir", &cfg.bundle.source_dir),
        ("[paths].build_dir", &cfg.paths.build_dir),
        ("[paths].docs_dir", &cfg.paths.docs_dir),
        ("[paths].readme", &cfg.paths.readme),
        ("[bundle].entry", &cfg.bundle.entry),
        ("[bundle].manifest", &cfg.bundle.manifest),
    ];
    for (name, other) in others {
        let other: PathBuf = other
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if other.as_os_str().is_empty()
            || other.starts_with(&normalized)
            || normalized.starts_with(&other)
        {
            return Err(TaskmakeError::ConfigError(format!(
                "[paths].temp_dir {:?} overlaps {name} {:?}",
                temp, other
            )));
        }
    }
    Ok(())
}

fn validate_groups(cfg: &RawConfigFile) -> Result<()> {
    let groups = [
        ("build_script", &cfg.groups.build_script),
        ("config", &cfg.groups.config),
        ("library", &cfg.groups.library),
        ("tests", &cfg.groups.tests),
    ];

    for (name, patterns) in groups {
        if patterns.is_empty() {
            return Err(TaskmakeError::ConfigError(format!(
                "[groups].{name} must list at least one pattern"
            )));
        }
        for pattern in patterns {
            Glob::new(pattern).map_err(|e| {
                TaskmakeError::ConfigError(format!(
                    "[groups].{name} has invalid glob '{pattern}': {e}"
                ))
            })?;
        }
    }
    Ok(())
}

fn validate_tools(cfg: &RawConfigFile) -> Result<()> {
    let tools = [
        ("linter", &cfg.tools.linter),
        ("coverage", &cfg.tools.coverage),
        ("test_runner", &cfg.tools.test_runner),
        ("bundler", &cfg.tools.bundler),
    ];

    for (name, program) in tools {
        if program.trim().is_empty() {
            return Err(TaskmakeError::ConfigError(format!(
                "[tools].{name} must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_test_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.test.timeout_ms == 0 {
        return Err(TaskmakeError::ConfigError(
            "[test].timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.test.reporter.trim().is_empty() {
        return Err(TaskmakeError::ConfigError(
            "[test].reporter must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_bundle_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.bundle.global_name.trim().is_empty() {
        return Err(TaskmakeError::ConfigError(
            "[bundle].global_name must not be empty".to_string(),
        ));
    }
    if cfg.bundle.entry.file_name().is_none() {
        return Err(TaskmakeError::ConfigError(format!(
            "[bundle].entry must name a file (got {:?})",
            cfg.bundle.entry
        )));
    }
    if cfg.bundle.manifest.file_name().is_none() {
        return Err(TaskmakeError::ConfigError(format!(
            "[bundle].manifest must name a file (got {:?})",
            cfg.bundle.manifest
        )));
    }
    Ok(())
}
