//! LLM provider clients with a uniform generation contract.
//!
//! # Architecture
//!
//! The crate is organized around a provider dispatch pattern:
//!
//! - [`generate`] - Unified entry point that dispatches to provider-specific implementations
//! - [`list_models`] - Model discovery, independent of the generate path
//! - [`openai`] - OpenAI Chat Completions client
//! - [`anthropic`] - Anthropic Messages API client
//! - [`gemini`] - Google Gemini GenerateContent client
//!
//! Every backend issues a single request per call, extracts the textual
//! completion from its response envelope, and normalizes the embedded JSON
//! array into [`WordEntry`] records. There are no internal retries: retry
//! policy belongs to the caller, and a failure aborts the current fetch.
//!
//! # Error Handling
//!
//! All failures surface as [`ProviderError`], classified by [`Stage`]:
//!
//! | Stage | Meaning |
//! |-------|---------|
//! | `Auth` | Credential rejected (HTTP 401/403) |
//! | `Network` | Transport failure, timeout, or other non-2xx status |
//! | `Shape` | Expected envelope field absent, or parsed value not an array |
//! | `Parse` | Completion text is not well-formed JSON |
//!
//! Field-level validation of each entry is deliberately not performed; a
//! missing `definition` or `example` deserializes as an empty string and
//! renders as an empty fragment downstream.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use lexinote_types::{Provider, WordEntry};

pub mod anthropic;
pub mod gemini;
pub mod openai;

/// Canonical OpenAI API base URL.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
/// Canonical Anthropic API base URL.
pub const ANTHROPIC_API_BASE_URL: &str = "https://api.anthropic.com/v1";
/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Output token ceiling for every generate call.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 120;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Failure stage at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Auth,
    Network,
    Shape,
    Parse,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Auth => "auth",
            Stage::Network => "network",
            Stage::Shape => "shape",
            Stage::Parse => "parse",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} rejected the API credential (HTTP {status})")]
    Auth { provider: Provider, status: u16 },
    #[error("{provider} request failed: {detail}")]
    Network { provider: Provider, detail: String },
    #[error("{provider} response missing expected structure: {detail}")]
    Shape { provider: Provider, detail: String },
    #[error("{provider} returned unparsable JSON: {detail}")]
    Parse { provider: Provider, detail: String },
}

impl ProviderError {
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            ProviderError::Auth { .. } => Stage::Auth,
            ProviderError::Network { .. } => Stage::Network,
            ProviderError::Shape { .. } => Stage::Shape,
            ProviderError::Parse { .. } => Stage::Parse,
        }
    }

    #[must_use]
    pub const fn provider(&self) -> Provider {
        match self {
            ProviderError::Auth { provider, .. }
            | ProviderError::Network { provider, .. }
            | ProviderError::Shape { provider, .. }
            | ProviderError::Parse { provider, .. } => *provider,
        }
    }
}

/// One generate call: prompt plus the active provider's tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub provider: Provider,
    pub api_key: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub prompt: &'a str,
}

/// Send `request.prompt` to the active backend and normalize the response
/// into word entries.
pub async fn generate(request: &GenerateRequest<'_>) -> Result<Vec<WordEntry>, ProviderError> {
    tracing::debug!(
        provider = %request.provider,
        model = request.model,
        "Sending generate request"
    );
    match request.provider {
        Provider::OpenAi => openai::generate(OPENAI_API_BASE_URL, request).await,
        Provider::Anthropic => anthropic::generate(ANTHROPIC_API_BASE_URL, request).await,
        Provider::Gemini => gemini::generate(GEMINI_API_BASE_URL, request).await,
    }
}

/// Model discovery for `provider`.
///
/// Failures are never fatal to a fetch; callers fall back to
/// [`Provider::fallback_models`].
pub async fn list_models(
    provider: Provider,
    api_key: &str,
) -> Result<Vec<String>, ProviderError> {
    match provider {
        Provider::OpenAi => openai::list_models(OPENAI_API_BASE_URL, api_key).await,
        Provider::Anthropic => anthropic::list_models(ANTHROPIC_API_BASE_URL, api_key).await,
        Provider::Gemini => gemini::list_models(GEMINI_API_BASE_URL, api_key).await,
    }
}

pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default()
    })
}

pub(crate) fn network_error(provider: Provider, error: &reqwest::Error) -> ProviderError {
    ProviderError::Network {
        provider,
        detail: error.to_string(),
    }
}

pub(crate) fn shape_error(provider: Provider, detail: impl Into<String>) -> ProviderError {
    ProviderError::Shape {
        provider,
        detail: detail.into(),
    }
}

/// Map a non-success status to Auth (401/403) or Network, with a capped
/// error body for the diagnostic log.
pub(crate) async fn check_status(
    provider: Provider,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = read_capped_error_body(response).await;
    tracing::warn!(provider = %provider, %status, body, "Provider returned error status");

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ProviderError::Auth {
            provider,
            status: status.as_u16(),
        });
    }
    Err(ProviderError::Network {
        provider,
        detail: format!("HTTP {status}: {body}"),
    })
}

async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(mut body) => {
            if body.len() > MAX_ERROR_BODY_BYTES {
                body.truncate(MAX_ERROR_BODY_BYTES);
                body.push_str("...(truncated)");
            }
            body
        }
        Err(_) => String::from("<unreadable body>"),
    }
}

/// Fetch and decode the JSON response envelope.
pub(crate) async fn read_envelope(
    provider: Provider,
    response: reqwest::Response,
) -> Result<serde_json::Value, ProviderError> {
    let body = response
        .text()
        .await
        .map_err(|e| network_error(provider, &e))?;
    serde_json::from_str(&body)
        .map_err(|e| shape_error(provider, format!("envelope is not JSON: {e}")))
}

/// Locate the first `[...]` bracketed substring in a completion that wraps
/// its JSON in prose or markdown fencing.
///
/// Greedy first-`[` to last-`]`, mirroring the regex the original scraper
/// used; nested arrays inside the payload stay intact.
#[must_use]
pub(crate) fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse a completion into word entries.
///
/// Malformed JSON is a `Parse` failure; well-formed JSON that is not an
/// array (a bare object, a scalar) is a `Shape` failure. Individual entry
/// fields are serde-defaulted and not validated here.
pub(crate) fn parse_word_entries(
    provider: Provider,
    text: &str,
) -> Result<Vec<WordEntry>, ProviderError> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|e| ProviderError::Parse {
            provider,
            detail: e.to_string(),
        })?;

    if !value.is_array() {
        return Err(shape_error(provider, "completion is not a JSON array"));
    }

    serde_json::from_value(value)
        .map_err(|e| shape_error(provider, format!("array elements are not objects: {e}")))
}

#[cfg(test)]
mod tests {
    use super::{Stage, extract_json_array, parse_word_entries};
    use lexinote_types::Provider;

    #[test]
    fn extracts_array_embedded_in_prose() {
        let text = "Here you go:\n```json\n[{\"word\":\"a\"}]\n```\nEnjoy!";
        assert_eq!(extract_json_array(text), Some("[{\"word\":\"a\"}]"));
    }

    #[test]
    fn extraction_is_greedy_across_nested_arrays() {
        let text = "x [1, [2, 3]] y";
        assert_eq!(extract_json_array(text), Some("[1, [2, 3]]"));
    }

    #[test]
    fn extraction_fails_without_brackets() {
        assert_eq!(extract_json_array("no json here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn bare_object_is_a_shape_failure() {
        let err = parse_word_entries(Provider::OpenAi, r#"{"word":"x"}"#).unwrap_err();
        assert_eq!(err.stage(), Stage::Shape);
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let err = parse_word_entries(Provider::OpenAi, "[{not json").unwrap_err();
        assert_eq!(err.stage(), Stage::Parse);
    }

    #[test]
    fn entries_with_missing_fields_are_tolerated() {
        let entries = parse_word_entries(
            Provider::OpenAi,
            r#"[{"language":"English","word":"serendipity"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "serendipity");
        assert_eq!(entries[0].definition, "");
    }

    #[test]
    fn scalar_array_elements_are_a_shape_failure() {
        let err = parse_word_entries(Provider::OpenAi, "[1, 2, 3]").unwrap_err();
        assert_eq!(err.stage(), Stage::Shape);
    }
}
