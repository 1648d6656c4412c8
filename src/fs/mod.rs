// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;

pub mod mock;

/// Abstract filesystem interface.
///
/// Tasks only touch the disk through this trait so staging and cleanup can be
/// exercised against [`mock::MockFileSystem`].
pub trait FileSystem: Send + Sync + Debug {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, creating missing parent directories.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Create a single directory. Fails if it exists or its parent is missing.
    fn create_dir(&self, path: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy one file. The destination's parent must already exist.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing to file {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .with_context(|| format!("copying {:?} to {:?}", from, to))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).with_context(|| format!("removing dir {:?}", path))
    }
}

/// Recursively copy the contents of `from` into `to` (`cp -r from/* to`).
///
/// `to` and any nested directories are created as needed; existing files are
/// overwritten. Returns the number of files copied.
pub fn copy_dir_recursive(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<usize> {
    if !fs.is_dir(from) {
        anyhow::bail!("source directory {:?} does not exist", from);
    }
    fs.create_dir_all(to)?;

    let mut copied = 0;
    for entry in fs.read_dir(from)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = to.join(name);

        if fs.is_dir(&entry) {
            copied += copy_dir_recursive(fs, &entry, &target)?;
        } else {
            trace!(from = ?entry, to = ?target, "copying file");
            fs.copy_file(&entry, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy a single file into `dir`, keeping its file name (`cp file dir`).
pub fn copy_into(fs: &dyn FileSystem, file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .with_context(|| format!("{:?} has no file name", file))?;
    let target = dir.join(name);
    fs.copy_file(file, &target)?;
    Ok(target)
}

/// Remove a file or a whole directory tree (`rm -r path`).
///
/// Returns `false` when there was nothing to remove.
pub fn remove_path(fs: &dyn FileSystem, path: &Path) -> Result<bool> {
    if fs.is_dir(path) {
        fs.remove_dir_all(path)?;
        Ok(true)
    } else if fs.exists(path) {
        fs.remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockFileSystem;
    use super::*;

    #[test]
    fn copy_dir_recursive_preserves_nesting() {
        let fs = MockFileSystem::new();
        fs.add_file("lib/a.js", "a");
        fs.add_file("lib/nested/b.js", "b");

        let copied = copy_dir_recursive(&fs, Path::new("lib"), Path::new("tmp/lib")).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs.read_to_string(Path::new("tmp/lib/a.js")).unwrap(), "a");
        assert_eq!(
            fs.read_to_string(Path::new("tmp/lib/nested/b.js")).unwrap(),
            "b"
        );
    }

    #[test]
    fn copy_dir_recursive_requires_source() {
        let fs = MockFileSystem::new();
        assert!(copy_dir_recursive(&fs, Path::new("lib"), Path::new("tmp/lib")).is_err());
    }

    #[test]
    fn remove_path_handles_files_dirs_and_absence() {
        let fs = MockFileSystem::new();
        fs.add_file("docs/README.md", "x");
        fs.add_file("tmp/lib/a.js", "a");

        assert!(remove_path(&fs, Path::new("docs/README.md")).unwrap());
        assert!(fs.is_dir(Path::new("docs")));
        assert!(remove_path(&fs, Path::new("tmp")).unwrap());
        assert!(!fs.exists(Path::new("tmp/lib/a.js")));
        assert!(!remove_path(&fs, Path::new("tmp")).unwrap());
    }

    #[test]
    fn real_copy_into_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("package.json");
        std::fs::write(&src, "{}").unwrap();
        let dest = dir.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let copied = copy_into(&RealFileSystem, &src, &dest).unwrap();

        assert_eq!(copied, dest.join("package.json"));
        assert_eq!(std::fs::read_to_string(copied).unwrap(), "{}");
    }
}
