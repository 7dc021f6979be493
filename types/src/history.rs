//! Bounded per-language history of previously generated words.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of recent words surfaced to the prompt by default.
pub const DEFAULT_RECENT_WORDS: usize = 20;

/// Rolling word history keyed by language.
///
/// Words are stored lowercase in insertion order, at most one copy per
/// language (case-insensitive), truncated to the most recent `limit`
/// entries on every insert. Pure in-memory structure; it is mutated only
/// by the fetch orchestrator and persisted as part of the settings
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    languages: BTreeMap<String, Vec<String>>,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive membership check.
    #[must_use]
    pub fn has_word(&self, language: &str, word: &str) -> bool {
        let needle = word.to_lowercase();
        self.languages
            .get(&language.to_lowercase())
            .is_some_and(|words| words.iter().any(|w| *w == needle))
    }

    /// Append the lowercase form of `word` unless already present, then
    /// truncate to the most recent `limit` entries by evicting the oldest.
    pub fn record(&mut self, language: &str, word: &str, limit: usize) {
        let lowered = word.to_lowercase();
        if lowered.is_empty() {
            return;
        }
        let words = self.languages.entry(language.to_lowercase()).or_default();
        if words.iter().any(|w| *w == lowered) {
            return;
        }
        words.push(lowered);
        if words.len() > limit {
            let excess = words.len() - limit;
            words.drain(..excess);
        }
    }

    /// Last `k` entries for `language` in original insertion order.
    ///
    /// Empty for an unseen language.
    #[must_use]
    pub fn recent(&self, language: &str, k: usize) -> &[String] {
        self.languages
            .get(&language.to_lowercase())
            .map(|words| {
                let start = words.len().saturating_sub(k);
                &words[start..]
            })
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.values().all(Vec::is_empty)
    }
}
