// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem.
///
/// Paths are normalised (`./tmp` and `tmp` are the same entry). Every
/// directory the code under test creates is recorded, so tests can assert
/// that no creation was attempted.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    created_dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            created_dirs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed a file, creating parent directories implicitly. Not recorded as
    /// a directory creation.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut files = self.files.lock().unwrap();
        let parent = parent_of(&path);
        ensure_dir_entry(&mut files, &parent, None);
        files.insert(path.clone(), MockEntry::File(content.into()));
        link_child(&mut files, &parent, &path);
    }

    /// Seed an (empty) directory and its parents. Not recorded as a creation.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut files = self.files.lock().unwrap();
        ensure_dir_entry(&mut files, &path, None);
    }

    /// Directories created through the `FileSystem` trait, in order.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.created_dirs.lock().unwrap().clone()
    }

    /// All file paths currently stored under `dir`, sorted.
    pub fn files_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = normalize(dir.as_ref());
        let files = self.files.lock().unwrap();
        let mut out: Vec<PathBuf> = files
            .iter()
            .filter(|(p, e)| matches!(e, MockEntry::File(_)) && p.starts_with(&dir))
            .map(|(p, _)| p.clone())
            .collect();
        out.sort();
        out
    }
}

/// Drop `.` components so equivalent spellings share one key.
fn normalize(path: &Path) -> PathBuf {
    let out: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn link_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
        if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

fn unlink_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
        if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
            children.retain(|c| c != name);
        }
    }
}

/// Create `path` and any missing ancestors. Newly created directories are
/// pushed onto `created` when given.
fn ensure_dir_entry(
    files: &mut HashMap<PathBuf, MockEntry>,
    path: &Path,
    mut created: Option<&mut Vec<PathBuf>>,
) {
    if files.contains_key(path) {
        return;
    }

    let parent = parent_of(path);
    if parent != path {
        // Avoid infinite loop at root
        ensure_dir_entry(files, &parent, created.as_deref_mut());
    }

    files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    if parent != path {
        link_child(files, &parent, path);
    }
    if let Some(created) = created {
        created.push(path.to_path_buf());
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = normalize(path);
        let files = self.files.lock().unwrap();
        match files.get(&path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let content = self.read(path)?;
        String::from_utf8(content).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.lock().unwrap();
        if matches!(files.get(&path), Some(MockEntry::Dir(_))) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }
        let parent = parent_of(&path);
        let mut created = self.created_dirs.lock().unwrap();
        ensure_dir_entry(&mut files, &parent, Some(&mut *created));
        files.insert(path.clone(), MockEntry::File(contents.to_vec()));
        link_child(&mut files, &parent, &path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(&normalize(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(&normalize(path)), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(&normalize(path)), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        match files.get(&normalize(path)) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.lock().unwrap();
        if files.contains_key(&path) {
            return Err(anyhow!("Already exists: {:?}", path));
        }
        let parent = parent_of(&path);
        if !matches!(files.get(&parent), Some(MockEntry::Dir(_))) {
            return Err(anyhow!("Parent directory missing: {:?}", parent));
        }
        files.insert(path.clone(), MockEntry::Dir(Vec::new()));
        link_child(&mut files, &parent, &path);
        self.created_dirs.lock().unwrap().push(path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.lock().unwrap();
        if matches!(files.get(&path), Some(MockEntry::File(_))) {
            return Err(anyhow!("Is a file: {:?}", path));
        }
        let mut created = self.created_dirs.lock().unwrap();
        ensure_dir_entry(&mut files, &path, Some(&mut *created));
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let content = self.read(from)?;
        let to = normalize(to);
        let parent = parent_of(&to);
        if !self.is_dir(&parent) {
            return Err(anyhow!("Parent directory missing: {:?}", parent));
        }
        self.write(&to, &content)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.lock().unwrap();
        match files.get(&path) {
            Some(MockEntry::File(_)) => {
                files.remove(&path);
                unlink_child(&mut files, &parent_of(&path), &path);
                Ok(())
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.lock().unwrap();
        match files.get(&path) {
            Some(MockEntry::Dir(_)) => {
                files.retain(|p, _| !p.starts_with(&path));
                unlink_child(&mut files, &parent_of(&path), &path);
                Ok(())
            }
            Some(MockEntry::File(_)) => Err(anyhow!("Not a directory: {:?}", path)),
            None => Err(anyhow!("Directory not found: {:?}", path)),
        }
    }
}
