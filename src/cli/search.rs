use tabled::Table;

use crate::{
    catalog::DEFAULT_SEARCH_LIMIT,
    cli::{build_catalog, exit_with},
    config::Config,
    utils, warning,
};

/// Searches tracks and prints them as a table.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `query` - Free-text search query
/// * `limit` - Maximum number of tracks; defaults to 10, capped at 50
///
/// # Example
///
/// ```bash
/// sporlrec search "Come Together" --limit 5
/// ```
///
/// An empty result is reported as a warning. Failures print the message the
/// HTTP API would return and exit with code 1.
pub async fn search(config: Config, query: String, limit: Option<u32>) {
    let catalog = build_catalog(&config);
    let limit = utils::clamp_limit(limit, DEFAULT_SEARCH_LIMIT);

    let pb = utils::spinner("Searching Spotify...");
    let result = catalog.search(Some(&query), limit).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => warning!("No tracks found for '{}'.", query),
        Ok(tracks) => println!("{}", Table::new(utils::track_table_rows(&tracks))),
        Err(e) => exit_with(e),
    }
}
