//! Mapping from raw Spotify records to the facade's canonical shapes.
//!
//! Everything here is pure and total over well-formed upstream payloads:
//! missing albums, images, preview URLs or artist ids simply yield absent
//! fields.

use crate::{
    types::{RawTrack, Suggestion, Track},
    utils,
};

/// Normalizes a raw track into a [`Track`] without the detail-only fields.
pub fn normalize_track(raw: &RawTrack) -> Track {
    let album = raw.album.as_ref();

    Track {
        id: raw.id.clone(),
        name: raw.name.clone(),
        artists: raw.artists.iter().map(|a| a.name.clone()).collect(),
        album: album.map(|a| a.name.clone()).unwrap_or_default(),
        image_url: album
            .and_then(|a| a.images.first())
            .map(|image| image.url.clone()),
        preview_url: raw.preview_url.clone(),
        duration_ms: None,
        release_date: None,
        external_urls: None,
    }
}

/// Normalizes a raw track including duration, album release date and
/// external links.
pub fn normalize_track_detail(raw: &RawTrack) -> Track {
    Track {
        duration_ms: raw.duration_ms,
        release_date: raw.album.as_ref().and_then(|a| a.release_date.clone()),
        external_urls: raw.external_urls.clone(),
        ..normalize_track(raw)
    }
}

/// Projects a raw track onto the autocomplete [`Suggestion`].
///
/// All artist names are joined with `", "` in their listed order, e.g.
/// `"The Beatles, Billy Preston"`.
pub fn to_suggestion(raw: &RawTrack) -> Suggestion {
    let artists: Vec<String> = raw.artists.iter().map(|a| a.name.clone()).collect();

    Suggestion {
        id: raw.id.clone(),
        name: raw.name.clone(),
        artist: utils::join_artists(&artists),
    }
}

/// Id of the first-listed artist, if it has one.
pub fn primary_artist_id(raw: &RawTrack) -> Option<&str> {
    raw.artists
        .first()
        .and_then(|artist| artist.id.as_deref())
        .filter(|id| !id.is_empty())
}
