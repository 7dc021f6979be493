//! Provider enumeration and per-provider constants.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An interchangeable LLM backend.
///
/// The set is closed on purpose: every dispatch site matches exhaustively,
/// so adding a backend is a compile-checked change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
    Gemini,
}

const PROVIDER_PARSE_VALUES: &[&str] = &[
    "openai",
    "gpt",
    "chatgpt",
    "anthropic",
    "claude",
    "gemini",
    "google",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid provider '{raw}'; expected one of: {PROVIDER_PARSE_VALUES:?}")]
pub struct ProviderParseError {
    raw: String,
}

impl ProviderParseError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Provider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Gemini",
        }
    }

    /// Model used when the settings document names none for this provider.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::Gemini => "gemini-1.5-flash",
        }
    }

    /// Hardcoded model list used when live discovery fails.
    ///
    /// Listing failures are never fatal; callers fall back to these.
    #[must_use]
    pub const fn fallback_models(self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["gpt-4o-mini", "gpt-4o", "gpt-4-turbo"],
            Provider::Anthropic => &[
                "claude-3-5-haiku-latest",
                "claude-3-5-sonnet-latest",
                "claude-3-opus-latest",
            ],
            Provider::Gemini => &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-2.0-flash"],
        }
    }

    pub fn parse(s: &str) -> Result<Self, ProviderParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "gpt" | "chatgpt" => Ok(Provider::OpenAi),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "gemini" | "google" => Ok(Provider::Gemini),
            _ => Err(ProviderParseError {
                raw: s.trim().to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Provider] {
        &[Provider::OpenAi, Provider::Anthropic, Provider::Gemini]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
