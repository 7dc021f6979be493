//! Core domain types for Lexinote.
//!
//! This crate holds the pure data model shared by every other crate:
//! the provider enumeration, language/difficulty configuration, the
//! word-entry wire record, the bounded per-language word history, and
//! the aggregate settings document.
//!
//! Nothing here performs IO or spawns tasks. Persistence lives in
//! `lexinote-config`, network calls in `lexinote-providers`.

mod entry;
mod history;
mod language;
mod provider;
mod settings;

pub use entry::WordEntry;
pub use history::{DEFAULT_RECENT_WORDS, HistoryStore};
pub use language::{Difficulty, LanguageConfig};
pub use provider::{Provider, ProviderParseError};
pub use settings::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_TEMPERATURE, ProviderSettings, Settings, SettingsError,
};
