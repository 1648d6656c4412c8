// src/tasks/browserify.rs

//! `browserify`: stage sources into a scratch tree, bundle, tear down.
//!
//! The scratch tree (the temp root) is removed on every exit path, including
//! staging failures. By default the bundler's exit code is only logged; set
//! `[bundle].fail_on_bundler_error` to count it like lint/test failures.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::{ToolInvocation, ToolRunner};
use crate::fs::{copy_dir_recursive, copy_into, remove_path, FileSystem};
use crate::tasks::{FailureCounter, TaskOutcome, TaskRunner};

/// The directories one `browserify` run works in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchLayout {
    /// Removed at the end of every run.
    pub temp_root: PathBuf,
    pub temp_lib: PathBuf,
    /// Persisted between runs.
    pub build_root: PathBuf,
}

impl ScratchLayout {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let temp_root = cfg.temp_dir();
        Self {
            temp_lib: temp_root.join("lib"),
            temp_root,
            build_root: cfg.build_dir(),
        }
    }

    /// Create the temp root (with `lib`) and the build root if missing.
    ///
    /// An existing temp root is reused as-is; nothing is created inside it.
    pub fn prepare(&self, fs: &dyn FileSystem) -> Result<()> {
        if !fs.is_dir(&self.temp_root) {
            fs.create_dir_all(&self.temp_root)?;
            fs.create_dir(&self.temp_lib)?;
        }

        if !fs.is_dir(&self.build_root) {
            fs.create_dir_all(&self.build_root)?;
        }
        Ok(())
    }

    /// Remove the temp root recursively. Absence is not an error.
    pub fn teardown(&self, fs: &dyn FileSystem) -> Result<()> {
        match remove_path(fs, &self.temp_root) {
            Ok(removed) => {
                debug!(path = ?self.temp_root, removed, "scratch directory cleaned up");
                Ok(())
            }
            Err(err) => {
                warn!(path = ?self.temp_root, error = %err, "failed to remove scratch directory");
                Err(err.into())
            }
        }
    }
}

/// `<bundler> <temp>/<entry> -o <build>/<output> -s <global name>`
pub fn bundle_invocation(cfg: &ConfigFile, layout: &ScratchLayout) -> ToolInvocation {
    let entry_name = cfg.bundle.entry.file_name().unwrap_or_default();
    ToolInvocation::new(&cfg.tools.bundler)
        .path_arg(layout.temp_root.join(entry_name))
        .arg("-o")
        .path_arg(layout.build_root.join(&cfg.bundle.output))
        .arg("-s")
        .arg(&cfg.bundle.global_name)
}

impl<R: ToolRunner> TaskRunner<R> {
    /// Stage, bundle, and always remove the temp root.
    ///
    /// A staging error is returned after cleanup. A failing bundler makes the
    /// task fail only when `fail_on_bundler_error` is set.
    pub async fn browserify(&mut self) -> Result<TaskOutcome> {
        let layout = ScratchLayout::from_config(&self.config);

        let bundled = self.stage_and_bundle(&layout).await;
        let cleaned = layout.teardown(self.fs.as_ref());

        let code = bundled?;
        cleaned?;

        let mut failures = FailureCounter::new();
        if code != 0 {
            if self.config.bundle.fail_on_bundler_error {
                failures.record(code);
                warn!(exit_code = code, "bundler failed");
            } else {
                warn!(exit_code = code, "bundler exited nonzero; not failing the task");
            }
        }
        Ok(failures.into_outcome())
    }

    async fn stage_and_bundle(&mut self, layout: &ScratchLayout) -> Result<i32> {
        let fs = self.fs.as_ref();
        layout.prepare(fs)?;

        let source_dir = self.config.resolve(&self.config.bundle.source_dir);
        let copied = copy_dir_recursive(fs, &source_dir, &layout.temp_lib)
            .with_context(|| format!("staging {:?} into {:?}", source_dir, layout.temp_lib))?;
        stage_file(fs, &self.config.resolve(&self.config.bundle.entry), &layout.temp_root)?;
        stage_file(fs, &self.config.resolve(&self.config.bundle.manifest), &layout.temp_root)?;
        info!(files = copied + 2, temp = ?layout.temp_root, "sources staged");

        Ok(self.run_tool(bundle_invocation(&self.config, layout)).await)
    }
}

fn stage_file(fs: &dyn FileSystem, file: &Path, dir: &Path) -> Result<()> {
    copy_into(fs, file, dir).with_context(|| format!("staging {:?}", file))?;
    Ok(())
}
