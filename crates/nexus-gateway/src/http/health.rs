use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health: liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("NEXUS_GIT_SHA"),
        "model": nexus_core::config::UPSTREAM_MODEL,
        "provider": state.provider.name(),
        "api_key_configured": state.config.upstream.api_key.is_some(),
    }))
}
