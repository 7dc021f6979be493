//! JSON settings file with atomic saves.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lexinote_types::Settings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("settings document at {path} is invalid: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Save collaborator injected into the fetch orchestrator.
///
/// Callers save after every settings mutation.
pub trait SettingsStore {
    fn save(&mut self, settings: &Settings) -> Result<(), StoreError>;
}

/// File-backed settings document.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform config directory location, e.g.
    /// `~/.config/lexinote/settings.json` on Linux.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lexinote").join("settings.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the document, merging a partial one over defaults.
    ///
    /// A missing file yields the defaults; a present but invalid file is an
    /// error rather than a silent reset, so a typo never wipes the word
    /// history.
    pub fn load_or_default(&self) -> Result<Settings, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Invalid {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SettingsStore for SettingsFile {
    /// Atomic save: write a temp file in the same directory, then rename
    /// over the destination.
    fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let body = serde_json::to_vec_pretty(settings).map_err(|e| StoreError::Invalid {
            path: self.path.clone(),
            source: e,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(&body).map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
