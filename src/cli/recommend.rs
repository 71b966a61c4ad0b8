use tabled::Table;

use crate::{
    catalog::DEFAULT_RECOMMEND_LIMIT,
    cli::{build_catalog, exit_with},
    config::Config,
    info, utils, warning,
};

/// Lists tracks related to a seed track using the configured strategy.
///
/// # Arguments
///
/// * `config` - Loaded configuration, including `RECOMMEND_STRATEGY`
/// * `track_id` - Spotify ID of the seed track
/// * `limit` - Maximum number of tracks; defaults to 8, capped at 50
///
/// # Example
///
/// ```bash
/// sporlrec recommend 2EqlS6tkEnglzr7tkKAAYD --limit 5
/// ```
pub async fn recommend(config: Config, track_id: String, limit: Option<u32>) {
    let catalog = build_catalog(&config);
    let limit = utils::clamp_limit(limit, DEFAULT_RECOMMEND_LIMIT);

    info!("Using recommendation strategy '{}'", catalog.strategy());
    let pb = utils::spinner("Fetching recommendations...");
    let result = catalog.recommend(Some(&track_id), limit).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => {
            warning!("No recommendations found for track {}.", track_id)
        }
        Ok(tracks) => println!("{}", Table::new(utils::track_table_rows(&tracks))),
        Err(e) => exit_with(e),
    }
}
