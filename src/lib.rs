//! Spotify Track Recommendation Library
//!
//! This library provides a small HTTP facade over the Spotify Web API that lets
//! a client search the catalog for tracks, get search-as-you-type suggestions
//! and obtain related tracks for a selected seed track. It owns the whole
//! backend integration: a cached client-credentials token, the composition of
//! dependent upstream calls, normalization of upstream payloads and a uniform
//! client-facing error contract.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the facade endpoints
//! - `catalog` - Endpoint orchestrators (search, autocomplete, recommend, track detail)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Integration and client-facing error types
//! - `normalize` - Pure mapping from upstream records to `Track` and `Suggestion`
//! - `server` - Router construction and HTTP server bootstrap
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlrec::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> sporlrec::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(&config).await
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod normalize;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used for top-level plumbing (startup, CLI commands) where the concrete error
/// type does not matter to the caller. Request handling uses the typed errors
/// from [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching new Spotify token...");
/// info!("Using recommendation strategy {}", strategy);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("New Spotify token obtained.");
/// success!("Server listening at http://{}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1. It is reserved for
/// startup and CLI failures; request handlers never call it.
///
/// # Example
///
/// ```
/// error!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures, such as an upstream call that failed a single
/// request while the server keeps running.
///
/// # Example
///
/// ```
/// warning!("[search] Spotify API error (status 429): rate limited");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
