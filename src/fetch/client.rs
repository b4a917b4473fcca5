//! Backoff-retrying request executor for the search API.
//!
//! [`ApiClient`] owns the reqwest client (default headers, timeouts) and the
//! [`RetryPolicy`]. Each call to [`ApiClient::execute`] is one logical request
//! that may span several HTTP attempts.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::classify::{Verdict, classify, unix_now};
use super::constants::ACCEPT_MEDIA_TYPE;
use super::error::FetchError;
use super::retry::{RetryDecision, RetryPolicy};
use super::sleeper::{Sleeper, TokioSleeper};
use crate::config::CollectorConfig;

/// HTTP client for the search API with rate-limit and server-error recovery.
///
/// Created once per run and reused for every page, taking advantage of
/// connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ApiClient {
    /// Creates a client that sleeps on the tokio timer.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the token is not a valid header
    /// value or the reqwest client cannot be built.
    pub fn new(config: &CollectorConfig) -> Result<Self, FetchError> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates a client with a custom [`Sleeper`].
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    #[instrument(level = "debug", skip_all, fields(authenticated = config.token().is_some()))]
    pub fn with_sleeper(
        config: &CollectorConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .user_agent(config.user_agent())
            .default_headers(default_headers(config.token())?)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::client_build(e.to_string()))?;

        if config.token().is_none() {
            debug!("no API token configured; requests are unauthenticated");
        }

        Ok(Self {
            client,
            policy: RetryPolicy::with_max_attempts(config.max_attempts()),
            sleeper,
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the retry policy in effect.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the sleeper shared with callers that pace their own requests.
    #[must_use]
    pub fn sleeper(&self) -> Arc<dyn Sleeper> {
        Arc::clone(&self.sleeper)
    }

    /// Performs a GET of `url` with `params` and returns the parsed JSON body.
    ///
    /// Rate-limited attempts wait for the announced quota reset; 500/502/503/504
    /// attempts back off linearly. Both consume one of the bounded attempts.
    ///
    /// # Errors
    ///
    /// - [`FetchError::HttpStatus`] on the first non-retryable error status
    /// - [`FetchError::RetriesExhausted`] when no attempt succeeded
    /// - [`FetchError::Network`] / [`FetchError::Timeout`] on transport failure
    /// - [`FetchError::Decode`] when a success body is not JSON
    /// - [`FetchError::InvalidUrl`] when `url` cannot be parsed
    #[instrument(skip(self, params), fields(url = %url))]
    pub async fn execute(&self, url: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let request_url = build_url(url, params)?;
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            let response = self
                .client
                .get(request_url.clone())
                .send()
                .await
                .map_err(|e| transport_error(url, e))?;

            let status = response.status();
            let verdict = classify(status, response.headers(), unix_now());

            match verdict {
                Verdict::Success => {
                    debug!(attempt, status = status.as_u16(), "request succeeded");
                    // Body read failures are transport errors; only a
                    // complete body that fails to parse is a decode error.
                    let body = response
                        .bytes()
                        .await
                        .map_err(|e| transport_error(url, e))?;
                    return serde_json::from_slice(&body).map_err(|e| FetchError::decode(url, e));
                }
                Verdict::Fatal => {
                    warn!(attempt, status = status.as_u16(), "request rejected");
                    return Err(FetchError::http_status(url, status.as_u16()));
                }
                Verdict::RateLimited { .. } | Verdict::RetryableServerError => {}
            }

            match self.policy.should_retry(verdict, attempt) {
                RetryDecision::Retry { delay, .. } => {
                    if matches!(verdict, Verdict::RateLimited { .. }) {
                        warn!(attempt, wait_secs = delay.as_secs(), "rate limited; waiting for quota reset");
                    } else {
                        warn!(
                            attempt,
                            status = status.as_u16(),
                            delay_ms = delay.as_millis(),
                            "server error; backing off"
                        );
                    }
                    self.sleeper.sleep(delay).await;
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(attempt, %reason, "not retrying");
                    if let Some(delay) = self.policy.backoff(verdict, attempt) {
                        self.sleeper.sleep(delay).await;
                    }
                    break;
                }
            }
        }

        Err(FetchError::retries_exhausted(url, max_attempts))
    }
}

/// Maps a reqwest failure on the wire to [`FetchError::Timeout`] or
/// [`FetchError::Network`].
fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::timeout(url)
    } else {
        FetchError::network(url, e)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Accept header plus the bearer credential when present.
fn default_headers(token: Option<&str>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            FetchError::client_build("API token contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn build_url(url: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
    let mut parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;
    if !params.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(parsed)
}
