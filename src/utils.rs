use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::types::{Track, TrackTableRow};

/// Largest page size the Spotify catalog accepts.
pub const MAX_LIMIT: u32 = 50;

/// Parses a `limit` query value.
///
/// Missing, unparsable or zero values fall back to `default`; anything above
/// [`MAX_LIMIT`] is clamped.
pub fn parse_limit(raw: Option<&str>, default: u32) -> u32 {
    clamp_limit(raw.and_then(|v| v.trim().parse::<u32>().ok()), default)
}

/// Applies the limit rules of [`parse_limit`] to an already parsed value,
/// e.g. a `--limit` CLI flag.
pub fn clamp_limit(limit: Option<u32>, default: u32) -> u32 {
    match limit {
        Some(0) | None => default,
        Some(limit) => limit.min(MAX_LIMIT),
    }
}

/// Builds the `Authorization` header value for the client-credentials
/// exchange: `Basic base64(client_id:client_secret)`.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", credentials)
}

/// Best-effort extraction of a human readable message from an upstream error
/// body.
///
/// Understands the Web API shape `{"error": {"status", "message"}}` and the
/// accounts service shape `{"error": "...", "error_description": "..."}`.
///
/// Returns `None` for empty and non-JSON bodies (e.g. an HTML page from a
/// gateway), so callers fall back to the status' reason phrase instead of
/// forwarding markup to clients.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body.trim()).ok()?;

    let candidates = [
        json.pointer("/error/message"),
        json.get("error_description"),
        json.get("error"),
        json.get("message"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

/// Formats a duration in milliseconds as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: join_artists(&t.artists),
            album: t.album.clone(),
            duration: t
                .duration_ms
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string()),
            id: t.id.clone(),
        })
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
