use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Upstream payloads. Every optional part of a Spotify record is defaulted so
// that sparse records (local files, regional availability) still decode.

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub external_urls: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<RawTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDetails {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub key: Option<i32>,
}

// Canonical shapes served to clients.

/// A track as served by the facade.
///
/// `imageUrl` and `previewUrl` are always present on the wire (possibly
/// `null`). The detail-only fields are omitted unless populated and keep the
/// snake_case names the detail page reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    #[serde(rename = "duration_ms", default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(rename = "release_date", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "external_urls", default, skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<BTreeMap<String, String>>,
}

/// Lightweight projection used by autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub artist: String,
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: u32,
}

impl SearchQuery {
    /// Returns `None` when the text is missing or blank.
    pub fn parse(text: Option<&str>, limit: u32) -> Option<Self> {
        let text = text.map(str::trim).filter(|t| !t.is_empty())?;
        Some(SearchQuery {
            text: text.to_string(),
            limit,
        })
    }
}

/// A validated recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub seed_track_id: String,
    pub limit: u32,
}

impl RecommendationRequest {
    /// Returns `None` when the seed track id is missing or blank.
    pub fn parse(seed_track_id: Option<&str>, limit: u32) -> Option<Self> {
        let seed_track_id = seed_track_id.map(str::trim).filter(|t| !t.is_empty())?;
        Some(RecommendationRequest {
            seed_track_id: seed_track_id.to_string(),
            limit,
        })
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
    pub id: String,
}
