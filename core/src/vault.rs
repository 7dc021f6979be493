//! Note storage boundary.
//!
//! The host note-storage API is consumed through this trait: read, create,
//! and modify by vault-relative path. [`FsVault`] is the filesystem-backed
//! implementation; [`MemoryVault`] backs tests and any embedding that keeps
//! notes in memory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait Vault {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> io::Result<String>;
    /// Create an empty note, including missing parent folders.
    fn create(&mut self, path: &Path) -> io::Result<()>;
    fn write(&mut self, path: &Path, content: &str) -> io::Result<()>;
}

/// Vault rooted at a directory; all note paths are relative to it.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Vault for FsVault {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn create(&mut self, path: &Path) -> io::Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, "")
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(self.resolve(path), content)
    }
}

/// In-memory vault keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    notes: BTreeMap<PathBuf, String>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(&self, path: &Path) -> Option<&str> {
        self.notes.get(path).map(String::as_str)
    }
}

impl Vault for MemoryVault {
    fn exists(&self, path: &Path) -> bool {
        self.notes.contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.notes
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "note not found"))
    }

    fn create(&mut self, path: &Path) -> io::Result<()> {
        self.notes.entry(path.to_path_buf()).or_default();
        Ok(())
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        self.notes.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FsVault, MemoryVault, Vault};
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn fs_vault_creates_parent_folders() {
        let dir = TempDir::new().unwrap();
        let mut vault = FsVault::new(dir.path());
        let note = Path::new("Journal/2026-03-05.md");

        assert!(!vault.exists(note));
        vault.create(note).unwrap();
        assert!(vault.exists(note));
        assert_eq!(vault.read(note).unwrap(), "");
    }

    #[test]
    fn fs_vault_round_trips_content() {
        let dir = TempDir::new().unwrap();
        let mut vault = FsVault::new(dir.path());
        let note = Path::new("note.md");
        vault.write(note, "hello").unwrap();
        assert_eq!(vault.read(note).unwrap(), "hello");
    }

    #[test]
    fn memory_vault_create_does_not_clobber_existing_content() {
        let mut vault = MemoryVault::new();
        let note = Path::new("note.md");
        vault.write(note, "existing").unwrap();
        vault.create(note).unwrap();
        assert_eq!(vault.read(note).unwrap(), "existing");
    }
}
