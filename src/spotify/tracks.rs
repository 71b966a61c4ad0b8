use crate::{
    error::SpotifyError,
    spotify::client::SpotifyClient,
    types::{AudioFeatures, RawTrack, RecommendationsResponse, SearchResponse},
};

/// The recommendations resource accepts at most this many seeds in total.
pub const MAX_SEEDS: usize = 5;

/// Searches the catalog for tracks matching `query`.
///
/// Sends `GET /search?type=track&q=...&limit=...&market=...`. A response
/// without a `tracks` page yields an empty list.
///
/// # Arguments
///
/// * `client` - Authenticated Spotify client
/// * `query` - Free-text search query, passed through unchanged
/// * `limit` - Page size (1-50)
///
/// # Example
///
/// ```
/// let items = search_tracks(&client, "Beatles", 10).await?;
/// ```
pub async fn search_tracks(
    client: &SpotifyClient,
    query: &str,
    limit: u32,
) -> Result<Vec<RawTrack>, SpotifyError> {
    let response: SearchResponse = client
        .get(
            "search",
            &[
                ("q", query.to_string()),
                ("type", "track".to_string()),
                ("limit", limit.to_string()),
                ("market", client.market().to_string()),
            ],
        )
        .await?;

    Ok(response.tracks.map(|page| page.items).unwrap_or_default())
}

/// Fetches a single track (`GET /tracks/{id}`).
///
/// # Arguments
///
/// * `client` - Authenticated Spotify client
/// * `track_id` - Spotify ID of the track; percent-encoded into the path
///
/// # Errors
///
/// An unknown id surfaces as [`SpotifyError::Upstream`] with status 404, see
/// [`SpotifyError::is_not_found`].
pub async fn get_track(client: &SpotifyClient, track_id: &str) -> Result<RawTrack, SpotifyError> {
    let path = format!("tracks/{}", urlencoding::encode(track_id));
    client.get(&path, &[]).await
}

/// Fetches tempo and key for a track (`GET /audio-features/{id}`).
///
/// Spotify reports an undetected tempo as `0` and an undetected key as `-1`;
/// [`RecommendationSeeds::new`] drops those.
pub async fn get_audio_features(
    client: &SpotifyClient,
    track_id: &str,
) -> Result<AudioFeatures, SpotifyError> {
    let path = format!("audio-features/{}", urlencoding::encode(track_id));
    client.get(&path, &[]).await
}

/// Seeds and tuning targets for the recommendations resource.
///
/// The resource accepts at most [`MAX_SEEDS`] seeds across tracks, artists
/// and genres combined.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSeeds {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub target_tempo: Option<f64>,
    pub target_key: Option<i32>,
}

impl RecommendationSeeds {
    /// Seeds with the track first, then its artist, then as many genres as
    /// still fit under [`MAX_SEEDS`].
    pub fn new(track_id: &str, artist_id: &str, genres: &[String], features: &AudioFeatures) -> Self {
        let tracks = vec![track_id.to_string()];
        let artists = vec![artist_id.to_string()];
        let remaining = MAX_SEEDS.saturating_sub(tracks.len() + artists.len());

        RecommendationSeeds {
            tracks,
            artists,
            genres: genres.iter().take(remaining).cloned().collect(),
            // A tempo of 0 means Spotify could not detect one.
            target_tempo: features.tempo.filter(|t| *t > 0.0),
            // Key -1 means no key was detected.
            target_key: features.key.filter(|k| *k >= 0),
        }
    }

    /// Total number of seeds across tracks, artists and genres.
    pub fn seed_count(&self) -> usize {
        self.tracks.len() + self.artists.len() + self.genres.len()
    }

    /// Query pairs for `GET /recommendations`. Empty seed lists and absent
    /// targets are left out.
    pub fn to_query(&self, limit: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("seed_tracks", self.tracks.join(",")),
        ];
        if !self.artists.is_empty() {
            query.push(("seed_artists", self.artists.join(",")));
        }
        if !self.genres.is_empty() {
            query.push(("seed_genres", self.genres.join(",")));
        }
        if let Some(tempo) = self.target_tempo {
            query.push(("target_tempo", tempo.to_string()));
        }
        if let Some(key) = self.target_key {
            query.push(("target_key", key.to_string()));
        }
        query
    }
}

/// Fetches seed-based recommendations (`GET /recommendations`).
///
/// # Arguments
///
/// * `client` - Authenticated Spotify client
/// * `seeds` - Seeds and tuning targets, see [`RecommendationSeeds::new`]
/// * `limit` - Number of tracks to request (1-100)
///
/// # Example
///
/// ```
/// let seeds = RecommendationSeeds::new(&track_id, &artist_id, &artist.genres, &features);
/// let tracks = get_recommendations(&client, &seeds, 9).await?;
/// ```
pub async fn get_recommendations(
    client: &SpotifyClient,
    seeds: &RecommendationSeeds,
    limit: u32,
) -> Result<Vec<RawTrack>, SpotifyError> {
    let response: RecommendationsResponse = client.get("recommendations", &seeds.to_query(limit)).await?;
    Ok(response.tracks)
}
