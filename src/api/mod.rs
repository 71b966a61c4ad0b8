//! # API Module
//!
//! HTTP handlers of the facade. Handlers only extract parameters and delegate
//! to [`crate::catalog::Catalog`]; validation, upstream calls and the
//! swallow-or-propagate policy live there.
//!
//! ## Endpoints
//!
//! - [`search`] - `GET /api/search?q&limit` (default limit 10)
//! - [`autocomplete`] - `GET /api/autocomplete?q&limit` (default limit 5, never fails)
//! - [`recommend`] - `GET /api/recommend?trackId&limit` (default limit 8)
//! - [`track`] - `GET /api/track/{id}`
//! - [`root`] - `GET /` plain-text liveness message
//! - [`health`] - `GET /health` status and version
//! - [`not_found`] - fallback for unknown routes
//!
//! Errors are rendered by [`crate::error::ApiError`] as `{ "error": string }`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sporlrec::api;
//!
//! let app = Router::new()
//!     .route("/api/search", get(api::search))
//!     .with_state(catalog);
//! ```

mod health;
mod tracks;

pub use health::{LIVENESS_MESSAGE, health, not_found, root};
pub use tracks::{RecommendParams, SearchParams, autocomplete, recommend, search, track};
