use axum::{http::header, response::Html, response::IntoResponse};

static INDEX_HTML: &str = include_str!("../../static/index.html");
static SCRIPT_JS: &str = include_str!("../../static/script.js");

/// Serve the embedded web chat UI at `GET /`.
pub async fn ui_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Serve the chat UI script at `GET /static/script.js`.
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}
