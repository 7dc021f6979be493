//! Google Gemini GenerateContent client.
//!
//! Communicates with `POST {base}/models/{model}:generateContent` using a
//! `key` query parameter for auth. The completion text lives at
//! `candidates[0].content.parts[0].text`.
//!
//! Gemini does not reliably honor "JSON only" instructions: completions
//! often arrive wrapped in prose or markdown fences. The first `[...]`
//! bracketed substring is extracted before parsing; the other backends
//! parse the completion text directly.

use serde_json::json;

use crate::{
    GenerateRequest, MAX_OUTPUT_TOKENS, ProviderError, check_status, extract_json_array,
    http_client, network_error, parse_word_entries, read_envelope, shape_error,
};
use lexinote_types::{Provider, WordEntry};

const PROVIDER: Provider = Provider::Gemini;

pub(crate) async fn generate(
    base: &str,
    request: &GenerateRequest<'_>,
) -> Result<Vec<WordEntry>, ProviderError> {
    let url = format!("{base}/models/{}:generateContent", request.model);
    let body = json!({
        "contents": [
            { "parts": [ { "text": request.prompt } ] }
        ],
        "generationConfig": {
            "temperature": request.temperature,
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
        },
    });

    let response = http_client()
        .post(&url)
        .query(&[("key", request.api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|e| network_error(PROVIDER, &e))?;
    let response = check_status(PROVIDER, response).await?;

    let envelope = read_envelope(PROVIDER, response).await?;
    let text = envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| shape_error(PROVIDER, "missing candidates[0].content.parts[0].text"))?;

    let array = extract_json_array(text).ok_or_else(|| ProviderError::Parse {
        provider: PROVIDER,
        detail: "no JSON array found in completion".to_string(),
    })?;

    parse_word_entries(PROVIDER, array)
}

pub(crate) async fn list_models(
    base: &str,
    api_key: &str,
) -> Result<Vec<String>, ProviderError> {
    let url = format!("{base}/models");
    let response = http_client()
        .get(&url)
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(|e| network_error(PROVIDER, &e))?;
    let response = check_status(PROVIDER, response).await?;

    let envelope = read_envelope(PROVIDER, response).await?;
    let models = envelope
        .pointer("/models")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| shape_error(PROVIDER, "missing models array"))?;

    // Gemini names models "models/gemini-1.5-flash"; strip the prefix.
    Ok(models
        .iter()
        .filter_map(|model| model.pointer("/name").and_then(serde_json::Value::as_str))
        .map(|name| name.strip_prefix("models/").unwrap_or(name).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{generate, list_models};
    use crate::{GenerateRequest, Stage};
    use lexinote_types::Provider;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request<'a>(prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            provider: Provider::Gemini,
            api_key: "gm-test",
            model: "gemini-1.5-flash",
            temperature: 0.9,
            prompt,
        }
    }

    fn completion_envelope(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn extracts_array_wrapped_in_prose_and_fences() {
        let server = MockServer::start().await;
        let text = "Sure! Here are your words:\n```json\n[{\"language\":\"English\",\"word\":\"ephemeral\",\"definition\":\"D\",\"example\":\"E\"}]\n```";
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "gm-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_envelope(text)))
            .expect(1)
            .mount(&server)
            .await;

        let entries = generate(&server.uri(), &request("prompt")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "ephemeral");
    }

    #[tokio::test]
    async fn completion_without_array_maps_to_parse_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_envelope("I cannot help with that.")),
            )
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Parse);
    }

    #[tokio::test]
    async fn missing_candidates_maps_to_shape_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Shape);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("key invalid"))
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Auth);
    }

    #[tokio::test]
    async fn lists_models_stripping_resource_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(query_param("key", "gm-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    { "name": "models/gemini-1.5-flash" },
                    { "name": "models/gemini-1.5-pro" }
                ]
            })))
            .mount(&server)
            .await;

        let models = list_models(&server.uri(), "gm-test").await.unwrap();
        assert_eq!(models, ["gemini-1.5-flash", "gemini-1.5-pro"]);
    }
}
