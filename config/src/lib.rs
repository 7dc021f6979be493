//! Settings persistence and daily-note configuration.
//!
//! The settings document is a single JSON file with a manual load/save
//! lifecycle: loaded once at startup (a partial or missing document merges
//! over defaults), saved by callers after every mutation. Writes are atomic
//! (temp file + rename) so a crash never leaves a half-written document.
//! Persistence is last-writer-wins; no locking, because the fetch
//! re-entrancy guard keeps at most one trigger in flight per process.

mod daily_notes;
mod store;

pub use daily_notes::{DailyNotesConfig, format_moment};
pub use store::{SettingsFile, SettingsStore, StoreError};
