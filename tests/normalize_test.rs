use serde_json::{Value, json};
use sporlrec::normalize::*;
use sporlrec::spotify::tracks::{MAX_SEEDS, RecommendationSeeds};
use sporlrec::types::{AudioFeatures, RawAlbum, RawArtist, RawTrack};

fn raw(value: Value) -> RawTrack {
    serde_json::from_value(value).unwrap()
}

fn full_track() -> RawTrack {
    raw(json!({
        "id": "2EqlS6tkEnglzr7tkKAAYD",
        "name": "Come Together",
        "artists": [
            { "id": "3WrFJ7ztbogyGnTHbHJFl2", "name": "The Beatles" },
            { "id": "5z6j8e0V4kEoKpMfS3tjdw", "name": "Billy Preston" }
        ],
        "album": {
            "name": "Abbey Road",
            "images": [
                { "url": "https://i.scdn.co/image/large", "height": 640, "width": 640 },
                { "url": "https://i.scdn.co/image/small", "height": 64, "width": 64 }
            ],
            "release_date": "1969-09-26"
        },
        "preview_url": "https://p.scdn.co/mp3-preview/abc",
        "duration_ms": 259946,
        "external_urls": { "spotify": "https://open.spotify.com/track/2EqlS6tkEnglzr7tkKAAYD" }
    }))
}

#[test]
fn test_normalize_track_uses_first_image_and_keeps_artist_order() {
    let track = normalize_track(&full_track());

    assert_eq!(track.id, "2EqlS6tkEnglzr7tkKAAYD");
    assert_eq!(track.name, "Come Together");
    assert_eq!(track.artists, vec!["The Beatles", "Billy Preston"]);
    assert_eq!(track.album, "Abbey Road");
    assert_eq!(track.image_url.as_deref(), Some("https://i.scdn.co/image/large"));
    assert_eq!(
        track.preview_url.as_deref(),
        Some("https://p.scdn.co/mp3-preview/abc")
    );

    // Detail-only fields stay empty
    assert!(track.duration_ms.is_none());
    assert!(track.release_date.is_none());
    assert!(track.external_urls.is_none());
}

#[test]
fn test_normalize_track_without_images_or_preview() {
    let track = normalize_track(&raw(json!({
        "id": "x",
        "name": "Untitled",
        "artists": [{ "name": "Unknown" }],
        "album": { "name": "Demo", "images": [] },
        "preview_url": null
    })));

    assert_eq!(track.image_url, None);
    assert_eq!(track.preview_url, None);

    let wire = serde_json::to_value(&track).unwrap();
    assert_eq!(wire["imageUrl"], Value::Null);
    assert_eq!(wire["previewUrl"], Value::Null);
}

#[test]
fn test_normalize_track_without_album() {
    let track = normalize_track(&RawTrack {
        id: "local".to_string(),
        name: "Local file".to_string(),
        ..RawTrack::default()
    });

    assert_eq!(track.album, "");
    assert_eq!(track.image_url, None);
    assert!(track.artists.is_empty());
}

#[test]
fn test_normalize_track_is_idempotent() {
    let raw = full_track();
    assert_eq!(normalize_track(&raw), normalize_track(&raw));
    assert_eq!(normalize_track_detail(&raw), normalize_track_detail(&raw));
}

#[test]
fn test_normalize_track_detail_fills_extended_fields() {
    let raw = full_track();
    let detail = normalize_track_detail(&raw);

    assert_eq!(detail.duration_ms, Some(259946));
    assert_eq!(detail.release_date.as_deref(), Some("1969-09-26"));
    assert_eq!(
        detail
            .external_urls
            .as_ref()
            .and_then(|urls| urls.get("spotify"))
            .map(String::as_str),
        Some("https://open.spotify.com/track/2EqlS6tkEnglzr7tkKAAYD")
    );

    // The summary fields are identical to the plain normalization
    let summary = normalize_track(&raw);
    assert_eq!(detail.id, summary.id);
    assert_eq!(detail.artists, summary.artists);
    assert_eq!(detail.image_url, summary.image_url);
}

#[test]
fn test_track_wire_keys() {
    let summary = serde_json::to_value(normalize_track(&full_track())).unwrap();
    let keys: Vec<&str> = summary
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for key in ["id", "name", "artists", "album", "imageUrl", "previewUrl"] {
        assert!(keys.contains(&key), "missing {}", key);
    }
    assert_eq!(keys.len(), 6);

    let detail = serde_json::to_value(normalize_track_detail(&full_track())).unwrap();
    assert_eq!(detail["duration_ms"], 259946);
    assert_eq!(detail["release_date"], "1969-09-26");
    assert!(detail["external_urls"]["spotify"].is_string());
}

#[test]
fn test_to_suggestion_joins_artists() {
    let suggestion = to_suggestion(&full_track());

    assert_eq!(suggestion.id, "2EqlS6tkEnglzr7tkKAAYD");
    assert_eq!(suggestion.name, "Come Together");
    assert_eq!(suggestion.artist, "The Beatles, Billy Preston");
}

#[test]
fn test_primary_artist_id() {
    assert_eq!(primary_artist_id(&full_track()), Some("3WrFJ7ztbogyGnTHbHJFl2"));

    // No artists at all
    assert_eq!(primary_artist_id(&RawTrack::default()), None);

    // First artist without an id; later artists are not considered
    let track = RawTrack {
        artists: vec![
            RawArtist {
                id: None,
                name: "Anonymous".to_string(),
            },
            RawArtist {
                id: Some("artist-2".to_string()),
                name: "Someone".to_string(),
            },
        ],
        album: Some(RawAlbum::default()),
        ..RawTrack::default()
    };
    assert_eq!(primary_artist_id(&track), None);

    let track = RawTrack {
        artists: vec![RawArtist {
            id: Some(String::new()),
            name: "Empty".to_string(),
        }],
        ..RawTrack::default()
    };
    assert_eq!(primary_artist_id(&track), None);
}

#[test]
fn test_recommendation_seeds_stay_within_maximum() {
    let genres: Vec<String> = ["rock", "pop", "merseybeat", "british invasion", "psychedelic"]
        .iter()
        .map(|g| g.to_string())
        .collect();
    let features = AudioFeatures {
        tempo: Some(84.5),
        key: Some(9),
    };

    let seeds = RecommendationSeeds::new("track-1", "artist-1", &genres, &features);

    assert_eq!(seeds.seed_count(), MAX_SEEDS);
    assert_eq!(seeds.genres, vec!["rock", "pop", "merseybeat"]);
    assert_eq!(seeds.target_tempo, Some(84.5));
    assert_eq!(seeds.target_key, Some(9));

    let query = seeds.to_query(9);
    assert!(query.contains(&("limit", "9".to_string())));
    assert!(query.contains(&("seed_tracks", "track-1".to_string())));
    assert!(query.contains(&("seed_artists", "artist-1".to_string())));
    assert!(query.contains(&("seed_genres", "rock,pop,merseybeat".to_string())));
    assert!(query.contains(&("target_tempo", "84.5".to_string())));
    assert!(query.contains(&("target_key", "9".to_string())));
}

#[test]
fn test_recommendation_seeds_skip_undetected_features() {
    let features = AudioFeatures {
        tempo: Some(0.0),
        key: Some(-1),
    };

    let seeds = RecommendationSeeds::new("track-1", "artist-1", &[], &features);

    assert_eq!(seeds.seed_count(), 2);
    assert_eq!(seeds.target_tempo, None);
    assert_eq!(seeds.target_key, None);

    let query = seeds.to_query(5);
    let keys: Vec<&str> = query.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["limit", "seed_tracks", "seed_artists"]);
}
