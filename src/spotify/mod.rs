//! # Spotify Integration Module
//!
//! This module is the integration layer between the facade and the Spotify Web
//! API. It handles the client-credentials token, authenticated HTTP calls,
//! error normalization and the typed catalog resources the orchestrators need.
//!
//! ## Architecture
//!
//! ```text
//! Endpoint Orchestrators (catalog)
//!          ↓
//! Spotify Integration Layer
//!     ├── Credential Cache (client credentials, single-flight refresh)
//!     ├── Client (bearer auth, timeout, error normalization)
//!     ├── Tracks (search, track, audio features, recommendations)
//!     └── Artists (artist, top tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! The facade never acts on behalf of a user, so it uses the client-credentials
//! flow: `POST /api/token` with HTTP basic auth built from the client id and
//! secret. The returned token is cached together with its absolute expiry and
//! reused until less than a minute of lifetime is left. Refresh is lazy and
//! single-flight: concurrent requests that find the token unusable await one
//! shared exchange.
//!
//! ## Error Handling
//!
//! Every call returns [`crate::error::SpotifyError`]:
//! - **`Authentication`** - the token exchange failed
//! - **`Upstream`** - Spotify answered with a non-success status; the status
//!   and the best message found in the body are preserved
//! - **`Network`** - DNS, connect or timeout failures
//! - **`Decode`** - a success body did not have the expected shape
//!
//! Nothing is retried here. Whether a failure fails the whole request or
//! degrades to an empty result is decided by the caller.
//!
//! ## API Coverage
//!
//! - `GET /search` - Track search
//! - `GET /tracks/{id}` - Single track
//! - `GET /audio-features/{id}` - Tempo and key of a track
//! - `GET /artists/{id}` - Artist with genres
//! - `GET /artists/{id}/top-tracks` - Artist's most popular tracks
//! - `GET /recommendations` - Seed-based recommendations
//! - `POST /api/token` - Client-credentials exchange

pub mod artists;
pub mod auth;
pub mod client;
pub mod tracks;

pub use auth::{Credential, CredentialCache};
pub use client::SpotifyClient;
