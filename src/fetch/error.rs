//! Error types for the fetch module.
//!
//! Only terminal conditions are errors. Rate limiting and retryable server
//! faults are [`Verdict`](super::Verdict)s handled inside the executor and
//! surface here solely as [`FetchError::RetriesExhausted`].

use thiserror::Error;

/// Terminal failures of a search API request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt ended in a rate limit or retryable server error.
    #[error("could not obtain a response from {url} after {attempts} attempts")]
    RetriesExhausted {
        /// The endpoint that never recovered.
        url: String,
        /// How many requests were issued.
        attempts: u32,
    },

    /// Non-retryable HTTP error status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The endpoint that rejected the request.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The endpoint that could not be reached.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before a response arrived.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The endpoint that timed out.
        url: String,
    },

    /// A success response whose body is not valid JSON.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// The endpoint that produced the body.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuild {
        /// Why construction failed.
        reason: String,
    },
}

impl FetchError {
    /// Creates a retries-exhausted error.
    pub fn retries_exhausted(url: impl Into<String>, attempts: u32) -> Self {
        Self::RetriesExhausted {
            url: url.into(),
            attempts,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a body decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a client construction error.
    pub fn client_build(reason: impl Into<String>) -> Self {
        Self::ClientBuild {
            reason: reason.into(),
        }
    }

    /// Returns true when the remote service never produced a usable response.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }
}
