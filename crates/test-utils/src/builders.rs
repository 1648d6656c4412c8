#![allow(dead_code)]

use std::path::PathBuf;

use taskmake::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the stock project layout rooted at `.`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    root: PathBuf,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
            root: PathBuf::from("."),
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn linter(mut self, program: &str) -> Self {
        self.config.tools.linter = program.to_string();
        self
    }

    pub fn bundler(mut self, program: &str) -> Self {
        self.config.tools.bundler = program.to_string();
        self
    }

    pub fn tests_group(mut self, patterns: &[&str]) -> Self {
        self.config.groups.tests = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn temp_dir(mut self, dir: &str) -> Self {
        self.config.paths.temp_dir = PathBuf::from(dir);
        self
    }

    pub fn fail_on_bundler_error(mut self, val: bool) -> Self {
        self.config.bundle.fail_on_bundler_error = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config)
            .expect("Failed to build valid config from builder")
            .with_root(self.root)
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
