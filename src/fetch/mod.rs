//! HTTP request execution against the search API.
//!
//! This module turns one logical GET into a JSON payload, absorbing the two
//! kinds of transient failure the search API produces.
//!
//! # Features
//!
//! - Rate-limit detection from `X-RateLimit-Remaining` / `X-RateLimit-Reset`
//! - Server-dictated wait for exhausted quota, linear backoff for 5xx faults
//! - Bounded attempts with a terminal error distinct from fatal statuses
//! - Configurable timeouts (10s connect, 30s read by default)
//!
//! # Example
//!
//! ```no_run
//! use repo_harvester::{ApiClient, CollectorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CollectorConfig::from_env();
//! let client = ApiClient::new(&config)?;
//! let params = [("q", "stars:>50".to_string()), ("page", "1".to_string())];
//! let payload = client
//!     .execute("https://api.github.com/search/repositories", &params)
//!     .await?;
//! println!("{}", payload["total_count"]);
//! # Ok(())
//! # }
//! ```

mod classify;
mod client;
pub mod constants;
mod error;
mod retry;
mod sleeper;

pub use classify::{Verdict, classify, rate_limit_wait};
pub use client::ApiClient;
pub use error::FetchError;
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryDecision, RetryPolicy};
pub use sleeper::{Sleeper, TokioSleeper};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, FetchError>` explicitly in function signatures.
