//! Idempotent append of a rendered block into the daily note.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::SENTINEL_HEADER;
use crate::vault::Vault;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create note {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to read note {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write note {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// The note already contains the sentinel header; nothing was written.
    AlreadyPresent,
}

/// Append `block` to the note at `path` at most once.
///
/// Creates the note empty if absent. The presence of the sentinel header
/// substring in the current content is the sole duplicate guard; there is
/// no separate "already ran today" flag. A user who edits the header out of
/// the note re-arms generation (known limitation, preserved).
pub fn append_once<V: Vault>(
    vault: &mut V,
    path: &Path,
    block: &str,
) -> Result<AppendOutcome, StorageError> {
    if !vault.exists(path) {
        vault.create(path).map_err(|source| StorageError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Created daily note");
    }

    let content = vault.read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.contains(SENTINEL_HEADER) {
        tracing::debug!(path = %path.display(), "Note already has a vocabulary block");
        return Ok(AppendOutcome::AlreadyPresent);
    }

    let updated = format!("{content}\n\n{block}");
    vault
        .write(path, &updated)
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Appended vocabulary block");
    Ok(AppendOutcome::Appended)
}
