use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::{Res, api, catalog::Catalog, config::Config, info, success};

/// Builds the facade router over a shared [`Catalog`].
///
/// # Routes
///
/// - `GET /` - plain-text liveness message
/// - `GET /health` - status and crate version
/// - `GET /api/search` - track search
/// - `GET /api/autocomplete` - search-as-you-type suggestions
/// - `GET /api/recommend` - tracks related to a seed track
/// - `GET /api/track/{id}` - single track with detail fields
///
/// Anything else answers 404 `{"error": "Not found"}`. CORS is permissive,
/// since the browser client is served from another origin.
///
/// # Example
///
/// ```
/// let catalog = Catalog::from_config(&config)?;
/// let app = build_router(catalog);
/// axum::serve(listener, app).await?;
/// ```
pub fn build_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/api/search", get(api::search))
        .route("/api/autocomplete", get(api::autocomplete))
        .route("/api/recommend", get(api::recommend))
        .route("/api/track/{id}", get(api::track))
        .fallback(api::not_found)
        .layer(CorsLayer::permissive())
        .with_state(catalog)
}

/// Binds the configured address and serves the facade until Ctrl-C.
///
/// The Spotify client is built once and shared by all requests, so the
/// credential cache and the connection pool live as long as the server.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the address cannot
/// be bound or the server fails while running.
pub async fn start_api_server(config: &Config) -> Res<()> {
    let catalog = Catalog::from_config(config)?;
    info!("Using recommendation strategy '{}'", catalog.strategy());

    let listener = TcpListener::bind(config.socket_addr()).await?;
    success!("Server listening at http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        // Without a signal handler, keep serving until the process is killed.
        Err(_) => std::future::pending::<()>().await,
    }
}
