use tabled::Table;

use crate::{
    cli::{build_catalog, exit_with},
    config::Config,
    info, utils,
};

/// Shows a single track with release date, Spotify link and preview URL.
///
/// # Example
///
/// ```bash
/// sporlrec track 2EqlS6tkEnglzr7tkKAAYD
/// ```
pub async fn track(config: Config, track_id: String) {
    let catalog = build_catalog(&config);

    let pb = utils::spinner("Fetching track details...");
    let result = catalog.track_detail(&track_id).await;
    pb.finish_and_clear();

    let track = match result {
        Ok(track) => track,
        Err(e) => exit_with(e),
    };

    println!("{}", Table::new(utils::track_table_rows(std::slice::from_ref(&track))));
    if let Some(release_date) = &track.release_date {
        info!("Released: {}", release_date);
    }
    if let Some(url) = track.external_urls.as_ref().and_then(|urls| urls.get("spotify")) {
        info!("Listen on Spotify: {}", url);
    }
    if let Some(preview) = &track.preview_url {
        info!("Preview: {}", preview);
    }
}
