//! Chat relay endpoint: POST /chat
//!
//! Forwards the browser's conversation history to the upstream model and
//! returns the first choice's text. One upstream call per request, no retries.
//!
//! Request:  `{"history": [{"role": "user", "content": "hello"}, ...]}`
//! Response: `{"response": "..."}`
//! Error:    `{"error": "..."}` (500 for upstream failures, 400 for a bad body)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use nexus_agent::provider::{ChatRequest, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;

pub const UPSTREAM_FAILED: &str = "Failed to get a response from the API.";
pub const INVALID_FORMAT: &str = "Invalid response format from the API.";
pub const INVALID_REQUEST: &str =
    "Request body must contain a 'history' array of {role, content} messages.";

#[derive(Deserialize)]
pub struct ChatBody {
    /// Full conversation so far, oldest first. Forwarded untouched.
    pub history: Vec<Message>,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Serialize)]
pub struct ChatError {
    pub error: String,
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<ChatError>) {
    (
        status,
        Json(ChatError {
            error: message.to_string(),
        }),
    )
}

/// POST /chat: relay the history upstream and return the model's answer.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ChatError>)> {
    let Json(body) = body.map_err(|e| {
        warn!(error = %e, "POST /chat rejected: malformed body");
        error(StatusCode::BAD_REQUEST, INVALID_REQUEST)
    })?;

    info!(
        messages = body.history.len(),
        provider = state.provider.name(),
        "relaying chat"
    );

    let req = ChatRequest::new(body.history);
    match state.provider.send(&req).await {
        Ok(resp) => {
            info!(
                len = resp.content.len(),
                model = resp.model.as_deref().unwrap_or("-"),
                "chat relayed"
            );
            Ok(Json(ChatReply {
                response: resp.content,
            }))
        }
        Err(e) if e.is_response_format() => {
            warn!(error = %e, "error parsing upstream response");
            Err(error(StatusCode::INTERNAL_SERVER_ERROR, INVALID_FORMAT))
        }
        Err(e) => {
            warn!(error = %e, "upstream request failed");
            Err(error(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILED))
        }
    }
}
