//! Collector configuration.
//!
//! A [`CollectorConfig`] is built once at process start and passed by
//! reference to [`ApiClient::new`](crate::ApiClient::new) and
//! [`Collector::new`](crate::Collector::new). Nothing reads the environment
//! after construction.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::DEFAULT_MAX_ATTEMPTS;
use crate::fetch::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_BASE_URL, DEFAULT_PAGE_DELAY, READ_TIMEOUT_SECS,
};
use crate::user_agent;

/// Environment variable holding the optional API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Search query run by the collector. Matches far more than 1000
/// repositories, so the API returns the top 1000 by stars.
pub const DEFAULT_QUERY: &str = "stars:>50";

/// Where the assembled table is written.
pub const DEFAULT_OUTPUT_PATH: &str = "github_repos_1000.csv";

/// Settings for one collection run.
#[derive(Clone)]
pub struct CollectorConfig {
    api_base_url: String,
    token: Option<String>,
    user_agent: String,
    query: String,
    output_path: PathBuf,
    max_attempts: u32,
    connect_timeout: Duration,
    read_timeout: Duration,
    page_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            user_agent: user_agent::default_user_agent(),
            query: DEFAULT_QUERY.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl CollectorConfig {
    /// Builds the default configuration, taking the token from `GITHUB_TOKEN`.
    ///
    /// A missing or blank token is not an error; requests go out
    /// unauthenticated at the lower rate limit.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_token(std::env::var(TOKEN_ENV_VAR).ok())
    }

    /// Sets the API token. Blank values are treated as absent.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Points the collector at another API root (a mock server in tests).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the maximum attempts per request (at least 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets connect and read timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// Sets the pause between consecutive pages.
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// API root without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// API token, if one was configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Search query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Output table path.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Maximum attempts per request.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// TCP connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Total request timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Pause between pages.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

impl std::fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_agent", &self.user_agent)
            .field("query", &self.query)
            .field("output_path", &self.output_path)
            .field("max_attempts", &self.max_attempts)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}
