use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{config::Config, error::SpotifyError, spotify::auth::CredentialCache, utils};

/// Authenticated access to the Spotify Web API.
///
/// Every call fetches a bearer token from the shared [`CredentialCache`] and
/// is bounded by the timeout configured on the underlying HTTP client. There
/// is no retry: a failed call is returned to the caller as is.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: String,
    credentials: CredentialCache,
}

impl SpotifyClient {
    /// Creates a client over an existing HTTP client and credential cache.
    ///
    /// # Arguments
    ///
    /// * `http` - HTTP client; its timeout bounds every call
    /// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
    /// * `market` - ISO 3166-1 alpha-2 country code sent where a market is required
    /// * `credentials` - Token cache shared by all clones of this client
    pub fn new(http: Client, api_url: String, market: String, credentials: CredentialCache) -> Self {
        SpotifyClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            market,
            credentials,
        }
    }

    /// Builds a client and its credential cache from the configuration,
    /// sharing one connection pool between the two.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;
        let credentials = CredentialCache::new(
            http.clone(),
            config.token_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        );

        Ok(Self::new(
            http,
            config.api_url.clone(),
            config.market.clone(),
            credentials,
        ))
    }

    /// Market sent with search and top-tracks requests.
    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// Authenticated `GET`, see [`SpotifyClient::call`].
    ///
    /// # Example
    ///
    /// ```
    /// let artist: ArtistDetails = client.get("artists/3WrFJ7ztbogyGnTHbHJFl2", &[]).await?;
    /// ```
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SpotifyError> {
        self.call(Method::GET, path, query, None).await
    }

    /// Issues an authenticated request against `{api_url}/{path}`.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Authentication`] if no token could be obtained
    /// - [`SpotifyError::Upstream`] for any non-success status, carrying the
    ///   status and the best message found in the body
    /// - [`SpotifyError::Network`] if the request could not be completed
    /// - [`SpotifyError::Decode`] if a success body does not match `T`
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, SpotifyError> {
        let token = self.credentials.get_token().await?;
        let url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));

        let mut request = self.http.request(method, &url).bearer_auth(token).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = utils::extract_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(SpotifyError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(SpotifyError::from)
    }
}
