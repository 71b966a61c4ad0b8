//! Error types for sporlrec.
//!
//! Two layers are kept apart:
//!
//! - [`SpotifyError`] describes what went wrong while talking to the Spotify
//!   Web API (credential exchange, upstream status, transport, payload).
//! - [`ApiError`] is what a client of the facade sees. It is rendered as
//!   `{ "error": string }` with the matching HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned to clients when the client-credentials exchange fails.
pub const AUTHENTICATION_FAILED: &str = "Could not authenticate with Spotify API.";

/// Failure while talking to the Spotify Web API.
///
/// `Clone` so that a single in-flight credential exchange can hand the same
/// outcome to every caller awaiting it.
#[derive(Debug, Clone, Error)]
pub enum SpotifyError {
    /// The client-credentials exchange failed.
    #[error("could not authenticate with Spotify API: {0}")]
    Authentication(String),

    /// Spotify answered with a non-success status.
    #[error("Spotify API responded with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout).
    #[error("request to Spotify API failed: {0}")]
    Network(String),

    /// A success response carried a body we could not decode.
    #[error("unexpected response from Spotify API: {0}")]
    Decode(String),
}

impl SpotifyError {
    /// Upstream HTTP status, if Spotify answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotifyError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SpotifyError::Decode(err.to_string())
        } else {
            SpotifyError::Network(err.to_string())
        }
    }
}

/// Client-facing error of the facade endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400). Raised before any upstream call.
    #[error("{0}")]
    Validation(String),

    /// The requested resource does not exist upstream (404).
    #[error("{0}")]
    NotFound(String),

    /// An upstream failure. `fallback` is the endpoint's generic message used
    /// when Spotify did not provide one.
    #[error("{fallback}: {source}")]
    Spotify {
        source: SpotifyError,
        fallback: &'static str,
    },
}

impl ApiError {
    pub fn spotify(source: SpotifyError, fallback: &'static str) -> Self {
        ApiError::Spotify { source, fallback }
    }

    /// HTTP status and client-visible message for this error.
    pub fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Spotify { source, fallback } => match source {
                SpotifyError::Authentication(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AUTHENTICATION_FAILED.to_string(),
                ),
                SpotifyError::Upstream { status, message } => {
                    // Only pass through statuses that are actually errors.
                    let status = StatusCode::from_u16(*status)
                        .ok()
                        .filter(|s| s.is_client_error() || s.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY);
                    let message = if message.is_empty() {
                        fallback.to_string()
                    } else {
                        message.clone()
                    };
                    (status, message)
                }
                SpotifyError::Network(_) | SpotifyError::Decode(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, fallback.to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
