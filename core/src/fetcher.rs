//! Fetch orchestration.
//!
//! [`Fetcher`] owns the settings value explicitly (no ambient global) and
//! carries the in-flight flag as instance state, so separate instances in
//! tests never share it. It checks preconditions, drives the active
//! provider, records returned words into history, persists settings, and
//! renders the markdown block.

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use lexinote_config::{DailyNotesConfig, SettingsStore};
use lexinote_providers::{GenerateRequest, ProviderError};
use lexinote_types::{Provider, Settings, WordEntry};

use crate::render;
use crate::vault::Vault;
use crate::writer::{self, AppendOutcome, StorageError};

/// User-visible notices (the host surfaces these; the CLI prints them).
///
/// Configuration problems are reported here and are not system faults;
/// provider failures additionally log full detail to the diagnostic log.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that routes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Provider capability consumed by the fetcher.
///
/// The live implementation dispatches to `lexinote-providers`; tests
/// substitute a mock to assert call counts.
#[allow(async_fn_in_trait)]
pub trait WordSource {
    async fn generate(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<Vec<WordEntry>, ProviderError>;

    async fn list_models(
        &self,
        provider: Provider,
        api_key: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

/// [`WordSource`] backed by the real provider clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveSource;

impl WordSource for LiveSource {
    async fn generate(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<Vec<WordEntry>, ProviderError> {
        lexinote_providers::generate(request).await
    }

    async fn list_models(
        &self,
        provider: Provider,
        api_key: &str,
    ) -> Result<Vec<String>, ProviderError> {
        lexinote_providers::list_models(provider, api_key).await
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct Fetcher<S, N, W> {
    settings: Settings,
    store: S,
    notifier: N,
    source: W,
    in_flight: bool,
}

impl<S, N, W> Fetcher<S, N, W>
where
    S: SettingsStore,
    N: Notifier,
    W: WordSource,
{
    #[must_use]
    pub fn new(settings: Settings, store: S, notifier: N, source: W) -> Self {
        Self {
            settings,
            store,
            notifier,
            source,
            in_flight: false,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch entries for every enabled language and render the markdown
    /// block.
    ///
    /// Returns `Ok(None)` on configuration problems (missing credential,
    /// zero enabled languages) after a user notice, without any network
    /// call. Provider failures are noticed, logged in full, and propagated;
    /// history is untouched in that case. No retries anywhere.
    pub async fn fetch_all(&mut self) -> Result<Option<String>, ProviderError> {
        let provider = self.settings.provider;
        let Some(api_key) = self.settings.active_credential() else {
            self.notifier.notify(&format!(
                "No API key configured for {}. Add one in settings.",
                provider.display_name()
            ));
            return Ok(None);
        };
        let api_key = api_key.to_string();

        let enabled = self.settings.enabled_languages();
        if enabled.is_empty() {
            self.notifier
                .notify("No languages enabled. Enable at least one in settings.");
            return Ok(None);
        }

        let prompt = crate::prompt::build(&enabled, &self.settings.history);
        let model = self.settings.model_for(provider).to_string();
        let request = GenerateRequest {
            provider,
            api_key: &api_key,
            model: &model,
            temperature: self.settings.temperature(),
            prompt: &prompt,
        };

        let entries = match self.source.generate(&request).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    provider = %provider,
                    stage = %e.stage(),
                    error = %e,
                    "Provider call failed"
                );
                self.notifier.notify(&format!(
                    "{} request failed; check the log for details.",
                    provider.display_name()
                ));
                return Err(e);
            }
        };

        tracing::info!(provider = %provider, entries = entries.len(), "Fetched vocabulary");

        let limit = self.settings.history_limit();
        for entry in &entries {
            self.settings.history.record(&entry.language, &entry.word, limit);
        }
        if let Err(e) = self.store.save(&self.settings) {
            // The block is still usable; losing one history update is the
            // lesser harm.
            tracing::warn!(error = %e, "Failed to persist settings after fetch");
            self.notifier.notify("Could not save word history; see log.");
        }

        Ok(Some(render::render_block(&entries)))
    }

    /// Manual command path: fetch now and append to today's note.
    ///
    /// Deliberately performs no sentinel pre-check, so a repeated manual
    /// invocation calls the provider again; the writer's content guard
    /// still keeps the note at one block.
    pub async fn fetch_and_append<V: Vault>(
        &mut self,
        vault: &mut V,
        daily: &DailyNotesConfig,
        today: NaiveDate,
    ) -> Result<Option<AppendOutcome>, FetchError> {
        let Some(block) = self.fetch_all().await? else {
            return Ok(None);
        };
        let path = daily.note_path(today);
        let outcome = writer::append_once(vault, &path, &block)?;
        match outcome {
            AppendOutcome::Appended => {
                self.notifier
                    .notify(&format!("Vocabulary added to {}", path.display()));
            }
            AppendOutcome::AlreadyPresent => {
                self.notifier
                    .notify("Today's note already has a vocabulary block.");
            }
        }
        Ok(Some(outcome))
    }

    /// Auto-trigger path for a note-open or note-create event.
    ///
    /// Eligibility: auto-append enabled, the opened path is today's daily
    /// note, no fetch currently in flight, and the note does not already
    /// carry the sentinel. A trigger arriving while one is in flight is
    /// ignored outright, not queued. Returns whether a block was appended.
    pub async fn handle_note_event<V: Vault>(
        &mut self,
        vault: &mut V,
        opened: &Path,
        daily: &DailyNotesConfig,
        today: NaiveDate,
    ) -> Result<bool, FetchError> {
        if !self.settings.auto_append {
            return Ok(false);
        }
        if !daily.is_daily_note(opened, today) {
            return Ok(false);
        }
        if self.in_flight {
            tracing::debug!(path = %opened.display(), "Fetch already in flight, ignoring trigger");
            return Ok(false);
        }
        if vault.exists(opened) {
            let content = vault.read(opened).map_err(|source| StorageError::Read {
                path: opened.to_path_buf(),
                source,
            })?;
            if content.contains(render::SENTINEL_HEADER) {
                return Ok(false);
            }
        }

        self.in_flight = true;
        let fetched = self.fetch_all().await;
        self.in_flight = false;

        let Some(block) = fetched? else {
            return Ok(false);
        };
        let outcome = writer::append_once(vault, opened, &block)?;
        Ok(outcome == AppendOutcome::Appended)
    }

    /// Models for the active provider, falling back to the hardcoded list
    /// when discovery fails for any reason. Never fatal.
    pub async fn available_models(&self) -> Vec<String> {
        let provider = self.settings.provider;
        let fallback = || {
            provider
                .fallback_models()
                .iter()
                .map(ToString::to_string)
                .collect()
        };
        let Some(api_key) = self.settings.active_credential() else {
            return fallback();
        };
        match self.source.list_models(provider, api_key).await {
            Ok(models) if !models.is_empty() => models,
            Ok(_) => fallback(),
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "Model discovery failed");
                fallback()
            }
        }
    }

    #[cfg(test)]
    fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }
}
