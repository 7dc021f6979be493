//! Aggregate settings document.
//!
//! Every field is serde-defaulted so a partial persisted document merges
//! over defaults at load. Persistence itself lives in `lexinote-config`;
//! this type is plain data plus the mutation rules that keep it valid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{HistoryStore, LanguageConfig, Provider};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

const MIN_TEMPERATURE: f32 = 0.7;
const MAX_TEMPERATURE: f32 = 1.0;

/// Credential and model selection for one backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("a language named '{0}' already exists")]
    DuplicateLanguage(String),
    #[error("language name must not be empty")]
    EmptyLanguageName,
}

/// Process-wide configuration state.
///
/// Exactly one provider is active at a time; a missing credential for the
/// active provider blocks any fetch. Loaded once at startup, saved by the
/// caller after every mutation (last-writer-wins, no locking).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: Provider,
    pub providers: BTreeMap<Provider, ProviderSettings>,
    #[serde(deserialize_with = "de_history_limit")]
    history_limit: usize,
    temperature: f32,
    pub auto_append: bool,
    pub languages: Vec<LanguageConfig>,
    pub history: HistoryStore,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            providers: BTreeMap::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            temperature: DEFAULT_TEMPERATURE,
            auto_append: true,
            languages: Vec::new(),
            history: HistoryStore::new(),
        }
    }
}

/// Accept any JSON value for the limit; anything that is not a positive
/// integer falls back to the default rather than failing the whole load.
fn de_history_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_u64()
        .filter(|n| *n > 0)
        .map(|n| usize::try_from(n).unwrap_or(DEFAULT_HISTORY_LIMIT))
        .unwrap_or(DEFAULT_HISTORY_LIMIT))
}

impl Settings {
    /// Trimmed, non-empty credential for the active provider, if any.
    #[must_use]
    pub fn active_credential(&self) -> Option<&str> {
        self.providers
            .get(&self.provider)
            .map(|p| p.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Configured model for `provider`, or its built-in default.
    #[must_use]
    pub fn model_for(&self, provider: Provider) -> &str {
        self.providers
            .get(&provider)
            .map(|p| p.model.trim())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| provider.default_model())
    }

    pub fn set_api_key(&mut self, provider: Provider, api_key: impl Into<String>) {
        self.providers.entry(provider).or_default().api_key = api_key.into();
    }

    pub fn set_model(&mut self, provider: Provider, model: impl Into<String>) {
        self.providers.entry(provider).or_default().model = model.into();
    }

    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Non-positive values are ignored and the previous limit retained.
    pub fn set_history_limit(&mut self, limit: i64) {
        if let Ok(limit) = usize::try_from(limit)
            && limit > 0
        {
            self.history_limit = limit;
        }
    }

    /// Temperature clamped to the supported 0.7–1.0 range.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
    }

    /// Languages eligible for a fetch.
    #[must_use]
    pub fn enabled_languages(&self) -> Vec<LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.enabled)
            .cloned()
            .collect()
    }

    /// Add a language; names are unique case-insensitively.
    pub fn add_language(&mut self, language: LanguageConfig) -> Result<(), SettingsError> {
        let name = language.name.trim();
        if name.is_empty() {
            return Err(SettingsError::EmptyLanguageName);
        }
        if self
            .languages
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
        {
            return Err(SettingsError::DuplicateLanguage(name.to_string()));
        }
        self.languages.push(language);
        Ok(())
    }

    pub fn remove_language(&mut self, name: &str) {
        self.languages
            .retain(|lang| !lang.name.eq_ignore_ascii_case(name.trim()));
    }
}
