use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    catalog::{
        Catalog, DEFAULT_AUTOCOMPLETE_LIMIT, DEFAULT_RECOMMEND_LIMIT, DEFAULT_SEARCH_LIMIT,
    },
    error::ApiError,
    types::{Suggestion, Track},
    utils::parse_limit,
};

// All parameters are taken as optional strings so that a missing or malformed
// value reaches the orchestrator instead of being rejected by the extractor.

/// Query parameters of `/api/search` and `/api/autocomplete`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters of `/api/recommend`.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    #[serde(rename = "trackId")]
    pub track_id: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/search?q=...&limit=...
///
/// Answers 400 when `q` is missing or blank, otherwise the matching tracks or
/// the mapped upstream failure.
pub async fn search(
    State(catalog): State<Catalog>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_SEARCH_LIMIT);
    let tracks = catalog.search(params.q.as_deref(), limit).await?;
    Ok(Json(tracks))
}

/// GET /api/autocomplete?q=...&limit=...
///
/// Always answers 200, possibly with an empty list.
pub async fn autocomplete(
    State(catalog): State<Catalog>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Suggestion>> {
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_AUTOCOMPLETE_LIMIT);
    Json(catalog.autocomplete(params.q.as_deref(), limit).await)
}

/// GET /api/recommend?trackId=...&limit=...
///
/// Answers 400 when `trackId` is missing. The seed track itself is never part
/// of the result.
pub async fn recommend(
    State(catalog): State<Catalog>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_RECOMMEND_LIMIT);
    let tracks = catalog.recommend(params.track_id.as_deref(), limit).await?;
    Ok(Json(tracks))
}

/// GET /api/track/{id}
///
/// Answers 404 `Track not found on Spotify` when Spotify does not know the id.
pub async fn track(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<Track>, ApiError> {
    let track = catalog.track_detail(&id).await?;
    Ok(Json(track))
}
