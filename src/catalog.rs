//! Endpoint orchestrators.
//!
//! [`Catalog`] composes the credential cache, the Spotify client and the
//! normalizer into the four client-facing operations. Each operation validates
//! its input before touching the network and decides, per endpoint, whether an
//! upstream failure is fatal or degrades to an empty result:
//!
//! | Operation | On upstream failure |
//! |---|---|
//! | [`Catalog::search`] | error |
//! | [`Catalog::autocomplete`] | empty list |
//! | [`Catalog::recommend`] | error (empty list if the seed has no artist) |
//! | [`Catalog::track_detail`] | error, 404 mapped to "not found" |

use std::{fmt, str::FromStr};

use crate::{
    config::Config,
    error::{ApiError, SpotifyError},
    normalize::{normalize_track, normalize_track_detail, primary_artist_id, to_suggestion},
    spotify::{
        SpotifyClient, artists,
        tracks::{self, RecommendationSeeds},
    },
    types::{RawTrack, RecommendationRequest, SearchQuery, Suggestion, Track},
    warning,
};

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_AUTOCOMPLETE_LIMIT: u32 = 5;
pub const DEFAULT_RECOMMEND_LIMIT: u32 = 8;
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

const SEARCH_FAILED: &str = "Failed to fetch search results from Spotify";
const RECOMMEND_FAILED: &str = "Failed to fetch recommendations from Spotify";
const TRACK_FAILED: &str = "Failed to fetch track details from Spotify";
const TRACK_NOT_FOUND: &str = "Track not found on Spotify";

/// How related tracks are found for a seed track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendStrategy {
    /// Seed track → primary artist → that artist's top tracks.
    #[default]
    TopTracks,
    /// Seed track → audio features and artist genres → recommendations
    /// resource seeded with track, artist and genres.
    Seeded,
}

impl FromStr for RecommendStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-tracks" | "top_tracks" => Ok(RecommendStrategy::TopTracks),
            "seeded" => Ok(RecommendStrategy::Seeded),
            other => Err(format!(
                "unknown recommendation strategy '{}', expected 'top-tracks' or 'seeded'",
                other
            )),
        }
    }
}

impl fmt::Display for RecommendStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendStrategy::TopTracks => write!(f, "top-tracks"),
            RecommendStrategy::Seeded => write!(f, "seeded"),
        }
    }
}

#[derive(Clone)]
pub struct Catalog {
    client: SpotifyClient,
    strategy: RecommendStrategy,
}

impl Catalog {
    pub fn new(client: SpotifyClient, strategy: RecommendStrategy) -> Self {
        Catalog { client, strategy }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            SpotifyClient::from_config(config)?,
            config.recommend_strategy,
        ))
    }

    pub fn strategy(&self) -> RecommendStrategy {
        self.strategy
    }

    /// Searches tracks and returns at most `limit` of them.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] if `text` is missing or blank, otherwise the
    /// mapped upstream failure.
    pub async fn search(&self, text: Option<&str>, limit: u32) -> Result<Vec<Track>, ApiError> {
        let query = SearchQuery::parse(text, limit)
            .ok_or_else(|| ApiError::Validation("Search query is required".to_string()))?;

        let items = tracks::search_tracks(&self.client, &query.text, query.limit)
            .await
            .map_err(|e| upstream_failure("search", &query.text, e, SEARCH_FAILED))?;

        Ok(items
            .iter()
            .map(normalize_track)
            .take(query.limit as usize)
            .collect())
    }

    /// Search-as-you-type suggestions.
    ///
    /// Best effort: queries shorter than [`MIN_AUTOCOMPLETE_CHARS`] return an
    /// empty list without any upstream call, and every failure is swallowed.
    pub async fn autocomplete(&self, text: Option<&str>, limit: u32) -> Vec<Suggestion> {
        let Some(text) = text
            .map(str::trim)
            .filter(|t| t.chars().count() >= MIN_AUTOCOMPLETE_CHARS)
        else {
            return Vec::new();
        };

        match tracks::search_tracks(&self.client, text, limit).await {
            Ok(items) => items
                .iter()
                .map(to_suggestion)
                .take(limit as usize)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Tracks related to a seed track, never including the seed itself.
    ///
    /// Returns an empty list when the seed track has no resolvable primary
    /// artist.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] if `seed_track_id` is missing or blank,
    /// otherwise the mapped failure of whichever pipeline step failed.
    pub async fn recommend(
        &self,
        seed_track_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let request = RecommendationRequest::parse(seed_track_id, limit)
            .ok_or_else(|| ApiError::Validation("Track ID is required".to_string()))?;

        let candidates = match self.strategy {
            RecommendStrategy::TopTracks => self.top_tracks_pipeline(&request).await,
            RecommendStrategy::Seeded => self.seeded_pipeline(&request).await,
        }
        .map_err(|e| upstream_failure("recommend", &request.seed_track_id, e, RECOMMEND_FAILED))?;

        Ok(without_seed(&candidates, &request))
    }

    /// A single track with duration, release date and external links.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when Spotify reports the track absent, otherwise
    /// the mapped upstream failure.
    pub async fn track_detail(&self, track_id: &str) -> Result<Track, ApiError> {
        let track_id = track_id.trim();
        if track_id.is_empty() {
            return Err(ApiError::Validation(
                "Track ID is required in URL path".to_string(),
            ));
        }

        match tracks::get_track(&self.client, track_id).await {
            Ok(raw) => Ok(normalize_track_detail(&raw)),
            Err(e) if e.is_not_found() => {
                warning!("[track] {}: {}", track_id, e);
                Err(ApiError::NotFound(TRACK_NOT_FOUND.to_string()))
            }
            Err(e) => Err(upstream_failure("track", track_id, e, TRACK_FAILED)),
        }
    }

    async fn top_tracks_pipeline(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RawTrack>, SpotifyError> {
        let seed = tracks::get_track(&self.client, &request.seed_track_id).await?;
        let Some(artist_id) = primary_artist_id(&seed) else {
            warning!(
                "Could not find primary artist ID for track: {}. Returning empty results.",
                request.seed_track_id
            );
            return Ok(Vec::new());
        };

        artists::get_artist_top_tracks(&self.client, artist_id).await
    }

    async fn seeded_pipeline(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RawTrack>, SpotifyError> {
        let seed = tracks::get_track(&self.client, &request.seed_track_id).await?;
        let Some(artist_id) = primary_artist_id(&seed) else {
            warning!(
                "Could not find primary artist ID for track: {}. Returning empty results.",
                request.seed_track_id
            );
            return Ok(Vec::new());
        };

        let features = tracks::get_audio_features(&self.client, &request.seed_track_id).await?;
        let artist = artists::get_artist(&self.client, artist_id).await?;
        let seeds = RecommendationSeeds::new(&request.seed_track_id, artist_id, &artist.genres, &features);

        // One extra in case the seed comes back and gets filtered out.
        let limit = (request.limit + 1).min(100);
        tracks::get_recommendations(&self.client, &seeds, limit).await
    }
}

fn without_seed(candidates: &[RawTrack], request: &RecommendationRequest) -> Vec<Track> {
    candidates
        .iter()
        .filter(|raw| raw.id != request.seed_track_id)
        .map(normalize_track)
        .take(request.limit as usize)
        .collect()
}

fn upstream_failure(
    endpoint: &str,
    subject: &str,
    err: SpotifyError,
    fallback: &'static str,
) -> ApiError {
    match err.status() {
        Some(status) => warning!(
            "[{}] {:?}: Spotify API error (status {}): {}",
            endpoint,
            subject,
            status,
            err
        ),
        None => warning!("[{}] {:?}: {}", endpoint, subject, err),
    }
    ApiError::spotify(err, fallback)
}
