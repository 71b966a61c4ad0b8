use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Plain-text liveness message served at `/`.
pub const LIVENESS_MESSAGE: &str = "Music Recommendation API is running!";

pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Uniform 404 body for unknown routes.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
