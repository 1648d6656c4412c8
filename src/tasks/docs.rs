// src/tasks/docs.rs

//! `docs`: replace the docs copy of the root README with the current one.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, TaskmakeError};
use crate::exec::ToolRunner;
use crate::fs::{copy_into, remove_path};
use crate::tasks::{TaskOutcome, TaskRunner};

impl<R: ToolRunner> TaskRunner<R> {
    /// Sync the README into the docs directory.
    ///
    /// Filesystem errors are not counted; they abort the task. A missing
    /// source README is reported before the old copy is touched.
    pub fn docs(&mut self) -> Result<TaskOutcome> {
        let readme = self.config.readme();
        let docs_dir = self.config.docs_dir();
        let target = docs_target(&readme, &docs_dir)?;

        let message = format!(
            "Syncing {} from root with {}",
            self.config.paths.readme.display(),
            self.config
                .paths
                .docs_dir
                .join(target.file_name().unwrap_or_default())
                .display()
        );
        self.progress(&message);

        if !self.fs.is_file(&readme) {
            return Err(TaskmakeError::MissingSource(readme));
        }

        if remove_path(self.fs.as_ref(), &target)? {
            debug!(path = ?target, "removed stale docs copy");
        }
        self.fs.create_dir_all(&docs_dir)?;
        copy_into(self.fs.as_ref(), &readme, &docs_dir)?;

        self.progress("Done.");
        Ok(TaskOutcome::Success)
    }
}

fn docs_target(readme: &Path, docs_dir: &Path) -> Result<PathBuf> {
    let name = readme.file_name().ok_or_else(|| {
        TaskmakeError::ConfigError(format!("[paths].readme {:?} has no file name", readme))
    })?;
    Ok(docs_dir.join(name))
}
