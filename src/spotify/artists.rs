use crate::{
    error::SpotifyError,
    spotify::client::SpotifyClient,
    types::{ArtistDetails, RawTrack, TopTracksResponse},
};

/// Retrieves an artist, mainly for its genres (`GET /artists/{id}`).
///
/// # Arguments
///
/// * `client` - Authenticated Spotify client
/// * `artist_id` - Spotify ID of the artist; percent-encoded into the path
///
/// # Returns
///
/// The artist with its genres, which may be empty for lesser-known artists.
pub async fn get_artist(client: &SpotifyClient, artist_id: &str) -> Result<ArtistDetails, SpotifyError> {
    let path = format!("artists/{}", urlencoding::encode(artist_id));
    client.get(&path, &[]).await
}

/// Retrieves an artist's most popular tracks in the configured market.
///
/// Sends `GET /artists/{id}/top-tracks?market=...`. The resource requires a
/// market and returns up to ten tracks ranked by Spotify's own popularity
/// ordering, which is preserved.
///
/// # Example
///
/// ```
/// let tracks = get_artist_top_tracks(&client, "3WrFJ7ztbogyGnTHbHJFl2").await?;
/// ```
pub async fn get_artist_top_tracks(
    client: &SpotifyClient,
    artist_id: &str,
) -> Result<Vec<RawTrack>, SpotifyError> {
    let path = format!("artists/{}/top-tracks", urlencoding::encode(artist_id));
    let response: TopTracksResponse = client
        .get(&path, &[("market", client.market().to_string())])
        .await?;

    Ok(response.tracks)
}
