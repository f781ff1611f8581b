use axum::{
    routing::{get, post},
    Router,
};
use nexus_agent::provider::LlmProvider;
use nexus_core::config::NexusConfig;
use std::sync::Arc;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
///
/// Read-only after startup: requests share nothing mutable.
pub struct AppState {
    pub config: NexusConfig,
    pub provider: Box<dyn LlmProvider>,
}

impl AppState {
    pub fn new(config: NexusConfig, provider: Box<dyn LlmProvider>) -> Self {
        Self { config, provider }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::ui::ui_handler))
        .route("/static/script.js", get(crate::http::ui::script_handler))
        .route("/health", get(crate::http::health::health_handler))
        .route("/chat", post(crate::http::chat::chat_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
