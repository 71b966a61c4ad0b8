//! Configuration management for the track recommendation facade.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)
//!
//! The Spotify client id and secret have no default; the server refuses to
//! start without both.

use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use thiserror::Error;

use crate::catalog::RecommendStrategy;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration of the facade.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub api_url: String,
    pub token_url: String,
    pub market: String,
    pub upstream_timeout: Duration,
    pub recommend_strategy: RecommendStrategy,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so `.env` files are taken into account.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if the client id or secret is unset
    /// - [`ConfigError::Invalid`] if an optional variable cannot be parsed
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env().await?;
    /// let config = Config::from_env()?;
    /// println!("listening on {}", config.socket_addr());
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Values are trimmed and empty values are treated as unset.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value for a variable name, if any
    ///
    /// # Variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `SPOTIFY_CLIENT_ID` | required |
    /// | `SPOTIFY_CLIENT_SECRET` | required |
    /// | `PORT` | `3001` |
    /// | `SERVER_HOST` | `0.0.0.0` |
    /// | `SPOTIFY_API_URL` | `https://api.spotify.com/v1` |
    /// | `SPOTIFY_API_TOKEN_URL` | `https://accounts.spotify.com/api/token` |
    /// | `SPOTIFY_MARKET` | `US` |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`, must be at least 1 |
    /// | `RECOMMEND_STRATEGY` | `top-tracks` (or `seeded`) |
    ///
    /// # Example
    ///
    /// ```
    /// let vars = HashMap::from([
    ///     ("SPOTIFY_CLIENT_ID", "id".to_string()),
    ///     ("SPOTIFY_CLIENT_SECRET", "secret".to_string()),
    /// ]);
    /// let config = Config::from_lookup(|key| vars.get(key).cloned())?;
    /// assert_eq!(config.port, 3001);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let client_id = get("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?;
        let client_secret =
            get("SPOTIFY_CLIENT_SECRET").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?;

        let host = parse_or("SERVER_HOST", get("SERVER_HOST"), || {
            IpAddr::from_str(DEFAULT_HOST).map_err(|e| e.to_string())
        })?;
        let port = parse_or("PORT", get("PORT"), || Ok(DEFAULT_PORT))?;
        let timeout_secs = parse_or("UPSTREAM_TIMEOUT_SECS", get("UPSTREAM_TIMEOUT_SECS"), || {
            Ok(DEFAULT_UPSTREAM_TIMEOUT_SECS)
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        let recommend_strategy = parse_or("RECOMMEND_STRATEGY", get("RECOMMEND_STRATEGY"), || {
            Ok(RecommendStrategy::default())
        })?;

        Ok(Config {
            client_id,
            client_secret,
            host,
            port,
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            market: get("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            recommend_strategy,
        })
    }

    /// Overrides the listening port, e.g. from `serve --port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T, D>(key: &'static str, value: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> Result<T, String>,
{
    match value {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => default().map_err(|reason| ConfigError::Invalid {
            key,
            value: String::new(),
            reason,
        }),
    }
}

/// Loads environment variables from `.env` files.
///
/// Reads `.env` from the current working directory first, then
/// `sporlrec/.env` from the platform-specific local data directory:
/// - Linux: `~/.local/share/sporlrec/.env`
/// - macOS: `~/Library/Application Support/sporlrec/.env`
/// - Windows: `%LOCALAPPDATA%/sporlrec/.env`
///
/// Neither file is required. Variables already present in the environment are
/// never overwritten.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(format!("Failed to load .env: {}", e)),
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    }
    Ok(())
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlrec/.env");
    path
}
