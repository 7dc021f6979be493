//! OpenAI Chat Completions client.
//!
//! Communicates with `POST {base}/chat/completions` using Bearer auth.
//! The completion text lives at `choices[0].message.content` and is
//! expected to be the raw JSON array, no surrounding prose.

use serde_json::json;

use crate::{
    GenerateRequest, MAX_OUTPUT_TOKENS, ProviderError, check_status, http_client, network_error,
    parse_word_entries, read_envelope, shape_error,
};
use lexinote_types::{Provider, WordEntry};

const PROVIDER: Provider = Provider::OpenAi;

pub(crate) async fn generate(
    base: &str,
    request: &GenerateRequest<'_>,
) -> Result<Vec<WordEntry>, ProviderError> {
    let url = format!("{base}/chat/completions");
    let body = json!({
        "model": request.model,
        "temperature": request.temperature,
        "max_tokens": MAX_OUTPUT_TOKENS,
        "messages": [
            { "role": "user", "content": request.prompt }
        ],
    });

    let response = http_client()
        .post(&url)
        .bearer_auth(request.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| network_error(PROVIDER, &e))?;
    let response = check_status(PROVIDER, response).await?;

    let envelope = read_envelope(PROVIDER, response).await?;
    let text = envelope
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| shape_error(PROVIDER, "missing choices[0].message.content"))?;

    parse_word_entries(PROVIDER, text)
}

pub(crate) async fn list_models(
    base: &str,
    api_key: &str,
) -> Result<Vec<String>, ProviderError> {
    let url = format!("{base}/models");
    let response = http_client()
        .get(&url)
        .bearer_auth(api_key)
        .send()
        .await
        .map_err(|e| network_error(PROVIDER, &e))?;
    let response = check_status(PROVIDER, response).await?;

    let envelope = read_envelope(PROVIDER, response).await?;
    let models = envelope
        .pointer("/data")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| shape_error(PROVIDER, "missing data array"))?;

    Ok(models
        .iter()
        .filter_map(|model| model.pointer("/id").and_then(serde_json::Value::as_str))
        .map(str::to_string)
        .collect())
}
