use crate::{config::Config, error, server};

/// Runs the HTTP facade until Ctrl-C.
///
/// # Arguments
///
/// * `config` - Loaded configuration; `serve --port` has already been applied
///
/// # Example
///
/// ```bash
/// sporlrec serve --port 8080
/// ```
///
/// Exits with code 1 if the server cannot start or fails while running.
pub async fn serve(config: Config) {
    if let Err(e) = server::start_api_server(&config).await {
        error!("Server failed. Err: {}", e);
    }
}
