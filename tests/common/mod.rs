//! A stub of the Spotify accounts service and Web API for integration tests.
//!
//! The stub binds an ephemeral local port and counts token exchanges and API
//! calls so tests can assert on what the facade sent upstream.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU16, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{
        HeaderMap, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use sporlrec::{
    catalog::{Catalog, RecommendStrategy},
    config::Config,
    server::build_router,
    utils::basic_auth_header,
};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

/// Number of tracks every search returns, regardless of the requested limit.
pub const SEARCH_RESULTS: usize = 5;
/// Number of top tracks per artist, the seed track included.
pub const TOP_TRACKS: usize = 10;
/// Artist whose top tracks always fail with 503.
pub const ARTIST_DOWN: &str = "artist-down";

#[derive(Debug, Clone)]
pub struct StubOptions {
    pub token_expires_in: i64,
    pub token_delay: Duration,
}

impl Default for StubOptions {
    fn default() -> Self {
        StubOptions {
            token_expires_in: 3600,
            token_delay: Duration::ZERO,
        }
    }
}

pub struct StubState {
    options: StubOptions,
    token_calls: AtomicUsize,
    api_calls: AtomicUsize,
    token_status: AtomicU16,
    search_status: AtomicU16,
    recommendation_query: Mutex<Option<HashMap<String, String>>>,
}

pub struct StubSpotify {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubSpotify {
    pub async fn start() -> Self {
        Self::start_with(StubOptions::default()).await
    }

    pub async fn start_with(options: StubOptions) -> Self {
        let state = Arc::new(StubState {
            options,
            token_calls: AtomicUsize::new(0),
            api_calls: AtomicUsize::new(0),
            token_status: AtomicU16::new(200),
            search_status: AtomicU16::new(200),
            recommendation_query: Mutex::new(None),
        });

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/search", get(search))
            .route("/v1/tracks/{id}", get(track))
            .route("/v1/audio-features/{id}", get(audio_features))
            .route("/v1/artists/{id}", get(artist))
            .route("/v1/artists/{id}/top-tracks", get(top_tracks))
            .route("/v1/recommendations", get(recommendations))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubSpotify {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        self.config_with(&[])
    }

    /// Configuration pointing at the stub, with extra variables on top.
    pub fn config_with(&self, extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = HashMap::from([
            ("SPOTIFY_CLIENT_ID".to_string(), CLIENT_ID.to_string()),
            ("SPOTIFY_CLIENT_SECRET".to_string(), CLIENT_SECRET.to_string()),
            ("SPOTIFY_API_URL".to_string(), format!("{}/v1", self.base_url)),
            (
                "SPOTIFY_API_TOKEN_URL".to_string(),
                format!("{}/api/token", self.base_url),
            ),
            ("UPSTREAM_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }

        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    pub fn catalog(&self, strategy: RecommendStrategy) -> Catalog {
        let mut config = self.config();
        config.recommend_strategy = strategy;
        Catalog::from_config(&config).unwrap()
    }

    pub fn app(&self) -> Router {
        build_router(self.catalog(RecommendStrategy::TopTracks))
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn api_calls(&self) -> usize {
        self.state.api_calls.load(Ordering::SeqCst)
    }

    pub fn set_token_status(&self, status: u16) {
        self.state.token_status.store(status, Ordering::SeqCst);
    }

    pub fn set_search_status(&self, status: u16) {
        self.state.search_status.store(status, Ordering::SeqCst);
    }

    pub fn recommendation_query(&self) -> Option<HashMap<String, String>> {
        self.state.recommendation_query.lock().unwrap().clone()
    }
}

/// Sends a GET through the facade router.
pub async fn get_response(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get_response(app, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn raw_track(id: &str, name: &str, artist_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [
            { "id": artist_id, "name": "The Beatles" },
            { "id": "artist-2", "name": "Billy Preston" }
        ],
        "album": {
            "name": "Abbey Road",
            "images": [
                { "url": format!("https://i.scdn.co/image/{}-640", id), "height": 640, "width": 640 },
                { "url": format!("https://i.scdn.co/image/{}-300", id), "height": 300, "width": 300 }
            ],
            "release_date": "1969-09-26"
        },
        "preview_url": null,
        "duration_ms": 185000,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) }
    })
}

fn upstream_error(status: u16, message: &str) -> Response {
    let code = StatusCode::from_u16(status).unwrap();
    (code, Json(json!({ "error": { "status": status, "message": message } }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"))
}

async fn token(State(state): State<Arc<StubState>>, headers: HeaderMap, body: String) -> Response {
    let call = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if !state.options.token_delay.is_zero() {
        tokio::time::sleep(state.options.token_delay).await;
    }

    let expected = basic_auth_header(CLIENT_ID, CLIENT_SECRET);
    let basic_ok = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !basic_ok || body != "grant_type=client_credentials" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_request", "error_description": "bad exchange" })),
        )
            .into_response();
    }

    let status = state.token_status.load(Ordering::SeqCst);
    if status != 200 {
        let code = StatusCode::from_u16(status).unwrap();
        return (
            code,
            Json(json!({ "error": "invalid_client", "error_description": "Invalid client" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": format!("token-{}", call),
        "token_type": "Bearer",
        "expires_in": state.options.token_expires_in
    }))
    .into_response()
}

async fn search(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }

    let status = state.search_status.load(Ordering::SeqCst);
    if status != 200 {
        return upstream_error(status, "API rate limit exceeded");
    }
    if params.get("type").map(String::as_str) != Some("track") || !params.contains_key("q") {
        return upstream_error(400, "Missing parameter type");
    }

    let items: Vec<Value> = (1..=SEARCH_RESULTS)
        .map(|i| raw_track(&format!("beatles-{}", i), &format!("Song {}", i), Some("artist-1")))
        .collect();
    Json(json!({ "tracks": { "items": items, "total": SEARCH_RESULTS } })).into_response()
}

async fn track(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }

    match id.as_str() {
        "missing" => upstream_error(404, "Non existing id"),
        "unavailable" => upstream_error(503, "Service unavailable"),
        // A gateway in front of the API answering with an HTML page.
        "gateway" => (
            StatusCode::BAD_GATEWAY,
            [(CONTENT_TYPE, "text/html")],
            "<html><body><h1>502 Bad Gateway</h1></body></html>",
        )
            .into_response(),
        // The seed resolves, but its artist's top tracks are unavailable.
        "orphaned" => Json(raw_track(&id, "Orphaned", Some(ARTIST_DOWN))).into_response(),
        "lonely" => {
            let mut track = raw_track(&id, "Lonely", None);
            track["artists"] = json!([]);
            Json(track).into_response()
        }
        _ => Json(raw_track(&id, "Come Together", Some("artist-1"))).into_response(),
    }
}

async fn audio_features(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }
    Json(json!({ "id": id, "tempo": 120.5, "key": 5 })).into_response()
}

async fn artist(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }
    Json(json!({
        "id": id,
        "name": "The Beatles",
        "genres": ["british invasion", "merseybeat", "rock", "classic rock"]
    }))
    .into_response()
}

async fn top_tracks(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }
    if id == ARTIST_DOWN {
        return upstream_error(503, "Service unavailable");
    }
    if !params.contains_key("market") {
        return upstream_error(400, "Missing market");
    }

    // The seed track ranks among its artist's top tracks.
    let mut tracks = vec![raw_track("seed-1", "Come Together", Some("artist-1"))];
    tracks.extend(
        (1..TOP_TRACKS).map(|i| raw_track(&format!("top-{}", i), &format!("Hit {}", i), Some("artist-1"))),
    );
    Json(json!({ "tracks": tracks })).into_response()
}

async fn recommendations(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return upstream_error(401, "No token provided");
    }
    *state.recommendation_query.lock().unwrap() = Some(params);

    let mut tracks = vec![raw_track("seed-1", "Come Together", Some("artist-1"))];
    tracks.extend((1..=5).map(|i| raw_track(&format!("rec-{}", i), &format!("Rec {}", i), Some("artist-9"))));
    Json(json!({ "tracks": tracks })).into_response()
}
