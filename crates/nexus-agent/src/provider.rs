use async_trait::async_trait;
use nexus_core::config::{ENABLE_THINKING, MAX_TOKENS, THINKING_BUDGET, UPSTREAM_MODEL};
use serde::{Deserialize, Serialize};

/// A single turn in the conversation history.
///
/// The role is opaque to the relay. Any extra fields the client attaches are
/// kept and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Body of the outbound chat-completions call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub enable_thinking: bool,
    pub thinking_budget: u32,
}

impl ChatRequest {
    /// Wrap a client history with the fixed upstream parameters.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: UPSTREAM_MODEL.to_string(),
            messages,
            max_tokens: MAX_TOKENS,
            enable_thinking: ENABLE_THINKING,
            thinking_budget: THINKING_BUDGET,
        }
    }
}

/// The one thing the relay needs from an upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub content: String,
    /// Model id echoed by the upstream, if any. Only used for logging.
    pub model: Option<String>,
}

/// Common interface for the upstream chat API.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging and error messages.
    fn name(&self) -> &str;

    /// Send a non-streaming chat request, wait for full response.
    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// True when the upstream answered successfully but the body did not
    /// carry `choices[0].message.content`.
    pub fn is_response_format(&self) -> bool {
        matches!(self, ProviderError::Parse(_))
    }
}
