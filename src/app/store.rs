//! File access for the migration, rooted at an explicit project directory.
//!
//! Every path handed to a [`FileStore`] is relative to the project root. The
//! operations never touch the process working directory, so tests can run
//! them against [`MemoryStore`] or a temporary directory.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait FileStore {
    /// Returns `None` when the file does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Removes an empty directory; fails if anything is still inside.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    /// Number of entries directly inside `path`; zero when it does not exist.
    fn dir_entry_count(&self, path: &Path) -> Result<usize>;

    /// Like [`FileStore::read`], but a missing file is an error.
    fn read_required(&self, path: &Path) -> Result<String> {
        self.read(path)?
            .with_context(|| format!("Required file {:?} does not exist", path))
    }
}

/// The real file system under `root`.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        let full = self.resolve(path);
        match fs::read_to_string(&full) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", full)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let full = self.resolve(path);
        fs::write(&full, contents).with_context(|| format!("Failed to write {:?}", full))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        fs::remove_file(&full).with_context(|| format!("Failed to remove {:?}", full))
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        fs::remove_dir(&full).with_context(|| format!("Failed to remove directory {:?}", full))
    }

    fn dir_entry_count(&self, path: &Path) -> Result<usize> {
        let full = self.resolve(path);
        match fs::read_dir(&full) {
            Ok(entries) => Ok(entries.count()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e).with_context(|| format!("Failed to list {:?}", full)),
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
