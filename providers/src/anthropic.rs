//! Anthropic Messages API client.
//!
//! Communicates with `POST {base}/messages` using `x-api-key` plus the
//! required `anthropic-version` header. The completion text lives at
//! `content[0].text` and is expected to be the raw JSON array.

use serde_json::json;

use crate::{
    GenerateRequest, MAX_OUTPUT_TOKENS, ProviderError, check_status, http_client, network_error,
    parse_word_entries, read_envelope, shape_error,
};
use lexinote_types::{Provider, WordEntry};

const PROVIDER: Provider = Provider::Anthropic;

const API_VERSION: &str = "2023-06-01";

pub(crate) async fn generate(
    base: &str,
    request: &GenerateRequest<'_>,
) -> Result<Vec<WordEntry>, ProviderError> {
    let url = format!("{base}/messages");
    let body = json!({
        "model": request.model,
        "max_tokens": MAX_OUTPUT_TOKENS,
        "temperature": request.temperature,
        "messages": [
            { "role": "user", "content": request.prompt }
        ],
    });

    let response = http_client()
        .post(&url)
        .header("x-api-key", request.api_key)
        .header("anthropic-version", API_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| network_error(PROVIDER, &e))?;
    let response = check_status(PROVIDER, response).await?;

    let envelope = read_envelope(PROVIDER, response).await?;
    let text = envelope
        .pointer("/content/0/text")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| shape_error(PROVIDER, "missing content[0].text"))?;

    parse_word_entries(PROVIDER, text)
}

pub(crate) async fn list_models(
    base: &str,
    api_key: &str,
) -> Result<Vec<String>, ProviderError> {
    let url = format!("{base}/models");
    let response = http_client()
        .get(&url)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
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

#[cfg(test)]
mod tests {
    use super::{generate, list_models};
    use crate::{GenerateRequest, Stage};
    use lexinote_types::Provider;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request<'a>(prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            provider: Provider::Anthropic,
            api_key: "sk-ant-test",
            model: "claude-3-5-haiku-latest",
            temperature: 0.9,
            prompt,
        }
    }

    fn completion_envelope(text: &str) -> serde_json::Value {
        json!({
            "content": [ { "type": "text", "text": text } ]
        })
    }

    #[tokio::test]
    async fn sends_required_headers_and_parses_entries() {
        let server = MockServer::start().await;
        let text = r#"[{"language":"French","word":"flâner","definition":"D","example":"E"}]"#;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header_exists("anthropic-version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_envelope(text)))
            .expect(1)
            .mount(&server)
            .await;

        let entries = generate(&server.uri(), &request("prompt")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].language, "French");
    }

    #[tokio::test]
    async fn forbidden_maps_to_auth_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Auth);
    }

    #[tokio::test]
    async fn server_error_maps_to_network_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Network);
    }

    #[tokio::test]
    async fn missing_content_block_maps_to_shape_stage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let err = generate(&server.uri(), &request("prompt")).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Shape);
    }

    #[tokio::test]
    async fn lists_model_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("x-api-key", "sk-ant-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [ { "id": "claude-3-5-haiku-latest" } ]
            })))
            .mount(&server)
            .await;

        let models = list_models(&server.uri(), "sk-ant-test").await.unwrap();
        assert_eq!(models, ["claude-3-5-haiku-latest"]);
    }
}
