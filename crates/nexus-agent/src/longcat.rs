use async_trait::async_trait;
use nexus_core::config::UpstreamConfig;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::provider::{ChatRequest, ChatResponse, LlmProvider, ProviderError};

/// LongCat chat-completions client (OpenAI wire format plus thinking knobs).
pub struct LongCatProvider {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl LongCatProvider {
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            url,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.bearer_token().to_string(), config.url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LlmProvider for LongCatProvider {
    fn name(&self) -> &str {
        "longcat"
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        debug!(
            model = %req.model,
            messages = req.messages.len(),
            "sending request to LongCat"
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "LongCat API error");
            return Err(ProviderError::Api {
                status,
                message: text,
            });
        }

        let text = resp.text().await?;
        parse_response(&text)
    }
}

/// Pull `choices[0].message.content` out of a chat-completions body.
pub fn parse_response(body: &str) -> Result<ChatResponse, ProviderError> {
    let api_resp: ApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let choice = api_resp
        .choices
        .ok_or_else(|| ProviderError::Parse("missing field `choices`".to_string()))?
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("`choices` is empty".to_string()))?;

    let content = choice
        .message
        .ok_or_else(|| ProviderError::Parse("missing field `choices[0].message`".to_string()))?
        .content
        .ok_or_else(|| {
            ProviderError::Parse("missing field `choices[0].message.content`".to_string())
        })?;

    Ok(ChatResponse {
        content,
        model: api_resp.model,
    })
}

// Upstream response types (private, deserialization only). Everything is
// optional so a shape mismatch becomes a Parse error instead of a panic.

#[derive(Deserialize)]
struct ApiResponse {
    model: Option<String>,
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "LongCat-Flash-Thinking",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1}
        }"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(resp.content, "hello");
        assert_eq!(resp.model.as_deref(), Some("LongCat-Flash-Thinking"));
    }

    #[test]
    fn minimal_body_is_enough() {
        let resp = parse_response(r#"{"choices":[{"message":{"content":"hello"}}]}"#).unwrap();
        assert_eq!(resp.content, "hello");
        assert!(resp.model.is_none());
    }

    #[test]
    fn shape_failures_are_parse_errors() {
        for body in [
            r#"{"choices": []}"#,
            r#"{"id": "x"}"#,
            r#"{"choices": null}"#,
            r#"{"choices": [{}]}"#,
            r#"{"choices": [{"message": {}}]}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": {"message": {"content": "hello"}}}"#,
            r#"{"choices": [{"message": {"content": 42}}]}"#,
            r#"[]"#,
            "<html>gateway timeout</html>",
            "",
        ] {
            let err = parse_response(body).unwrap_err();
            assert!(err.is_response_format(), "body: {body}");
        }
    }

    #[test]
    fn from_config_uses_configured_url() {
        let config = UpstreamConfig {
            url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            api_key: None,
        };
        let provider = LongCatProvider::from_config(&config);
        assert_eq!(provider.url(), "http://127.0.0.1:1/v1/chat/completions");
        assert_eq!(provider.name(), "longcat");
    }

    #[test]
    fn default_config_targets_longcat() {
        let provider = LongCatProvider::from_config(&UpstreamConfig::default());
        assert_eq!(
            provider.url(),
            "https://api.longcat.chat/openai/v1/chat/completions"
        );
    }
}
