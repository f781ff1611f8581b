//! Shared helpers for handler tests: a scripted provider and oneshot request
//! shortcuts against the real router.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use nexus_agent::provider::{ChatRequest, ChatResponse, LlmProvider, ProviderError};
use nexus_core::config::NexusConfig;
use tower::ServiceExt;

use crate::app::{build_router, AppState};

enum Outcome {
    Reply(String),
    ApiError(u16),
    BadShape,
}

/// Provider that returns a fixed outcome and records every request it sees.
pub(crate) struct FakeProvider {
    outcome: Outcome,
    seen: Arc<Mutex<Vec<ChatRequest>>>,
}

impl FakeProvider {
    pub fn reply(content: &str) -> Self {
        Self::with(Outcome::Reply(content.to_string()))
    }

    pub fn api_error(status: u16) -> Self {
        Self::with(Outcome::ApiError(status))
    }

    pub fn bad_shape() -> Self {
        Self::with(Outcome::BadShape)
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.seen.lock().unwrap().push(req.clone());
        match &self.outcome {
            Outcome::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: None,
            }),
            Outcome::ApiError(status) => Err(ProviderError::Api {
                status: *status,
                message: "upstream said no".to_string(),
            }),
            Outcome::BadShape => Err(ProviderError::Parse("`choices` is empty".to_string())),
        }
    }
}

/// Read side of a [`FakeProvider`] after it has been moved into the router.
pub(crate) struct FakeHandle {
    seen: Arc<Mutex<Vec<ChatRequest>>>,
}

impl FakeHandle {
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.seen.lock().unwrap().last().cloned()
    }
}

pub(crate) fn test_router(fake: FakeProvider) -> (Router, FakeHandle) {
    let handle = FakeHandle {
        seen: fake.seen.clone(),
    };
    (router_with(Box::new(fake)), handle)
}

pub(crate) fn router_with(provider: Box<dyn LlmProvider>) -> Router {
    build_router(Arc::new(AppState::new(NexusConfig::default(), provider)))
}

pub(crate) async fn get(router: Router, path: &str) -> Response {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    router.oneshot(req).await.unwrap()
}

pub(crate) async fn post_json(router: Router, path: &str, body: &str) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    router.oneshot(req).await.unwrap()
}

pub(crate) async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub(crate) async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}
