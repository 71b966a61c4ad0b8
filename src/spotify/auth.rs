use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::{Client, header::AUTHORIZATION};
use tokio::sync::Mutex;

use crate::{
    error::SpotifyError, info, success, types::TokenResponse, utils, warning,
};

/// A token is only handed out while it has more than this many seconds left,
/// so it cannot expire mid-flight.
pub const SAFETY_MARGIN_SECS: i64 = 60;

/// A client-credentials bearer token and its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Builds a credential that expires `expires_in_secs` after `obtained_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Authentication`] when the lifetime reported by
    /// the token endpoint does not fit into a timestamp.
    pub fn new(
        token: String,
        expires_in_secs: i64,
        obtained_at: DateTime<Utc>,
    ) -> Result<Self, SpotifyError> {
        let expires_at = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                SpotifyError::Authentication(format!(
                    "token endpoint returned an out-of-range lifetime: {}s",
                    expires_in_secs
                ))
            })?;

        Ok(Credential { token, expires_at })
    }

    /// `now < expires_at - SAFETY_MARGIN_SECS`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .checked_sub_signed(Duration::seconds(SAFETY_MARGIN_SECS))
            .is_some_and(|deadline| now < deadline)
    }
}

type Exchange = Shared<BoxFuture<'static, Result<Credential, SpotifyError>>>;

#[derive(Default)]
struct CacheState {
    credential: Option<Credential>,
    in_flight: Option<(u64, Exchange)>,
    generation: u64,
}

struct Inner {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    state: Mutex<CacheState>,
}

/// Process-wide cache of the client-credentials token.
///
/// Refreshes lazily on demand. Concurrent callers that find no usable token
/// share one in-flight exchange instead of each starting their own. The
/// exchange runs on a spawned task, so a caller that is cancelled (e.g. the
/// HTTP client disconnected) does not leave a half-finished exchange behind
/// for the next request. A failed exchange clears the cached credential so the
/// next call starts clean.
///
/// Must be used from within a Tokio runtime.
///
/// # Example
///
/// ```
/// let cache = CredentialCache::new(http, token_url, client_id, client_secret);
/// let token = cache.get_token().await?;
/// ```
#[derive(Clone)]
pub struct CredentialCache {
    inner: Arc<Inner>,
}

impl CredentialCache {
    /// Creates an empty cache. No exchange happens until the first
    /// [`CredentialCache::get_token`].
    ///
    /// # Arguments
    ///
    /// * `http` - HTTP client used for the exchange, carrying the upstream timeout
    /// * `token_url` - Accounts service token endpoint
    /// * `client_id` - Spotify application client id
    /// * `client_secret` - Spotify application client secret
    pub fn new(http: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        CredentialCache {
            inner: Arc::new(Inner {
                http,
                token_url,
                client_id,
                client_secret,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }

    /// Returns a bearer token that is valid for at least the safety margin.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Authentication`] when the exchange fails. Every
    /// caller sharing that exchange receives the same error.
    pub async fn get_token(&self) -> Result<String, SpotifyError> {
        let exchange = {
            let mut state = self.inner.state.lock().await;

            if let Some(credential) = state.credential.as_ref() {
                if credential.is_usable_at(Utc::now()) {
                    return Ok(credential.token.clone());
                }
            }

            match state.in_flight.clone() {
                Some((_, pending)) => pending,
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    let exchange = self.start_exchange(generation);
                    state.in_flight = Some((generation, exchange.clone()));
                    exchange
                }
            }
        };

        exchange.await.map(|credential| credential.token)
    }

    /// Currently cached credential, usable or not.
    pub async fn cached(&self) -> Option<Credential> {
        self.inner.state.lock().await.credential.clone()
    }

    /// Runs the exchange on its own task so it completes and settles the
    /// cache even if every caller waiting on it goes away.
    fn start_exchange(&self, generation: u64) -> Exchange {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = inner.exchange().await;

            let mut state = inner.state.lock().await;
            if matches!(&state.in_flight, Some((current, _)) if *current == generation) {
                state.in_flight = None;
                state.credential = outcome.as_ref().ok().cloned();
            }
            outcome
        });

        async move {
            task.await.unwrap_or_else(|e| {
                Err(SpotifyError::Authentication(format!(
                    "token exchange did not complete: {}",
                    e
                )))
            })
        }
        .boxed()
        .shared()
    }
}

impl Inner {
    async fn exchange(&self) -> Result<Credential, SpotifyError> {
        info!("Fetching new Spotify token...");

        let result = self.request_token().await;
        match &result {
            Ok(_) => success!("New Spotify token obtained."),
            Err(e) => warning!("Error fetching Spotify token: {}", e),
        }
        result
    }

    async fn request_token(&self) -> Result<Credential, SpotifyError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SpotifyError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = utils::extract_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(SpotifyError::Authentication(format!(
                "token endpoint responded with status {}: {}",
                status.as_u16(),
                message
            )));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| SpotifyError::Authentication(e.to_string()))?;

        Credential::new(token.access_token, token.expires_in, Utc::now())
    }
}
