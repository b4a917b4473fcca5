//! Constants for the fetch module (endpoint, timeouts, pagination window).

use std::time::Duration;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Path of the repository search endpoint, relative to the API base URL.
pub const SEARCH_REPOSITORIES_PATH: &str = "/search/repositories";

/// Media type requested from the API.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (30 seconds).
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Search results the API will page through at most (10 pages of 100).
pub const MAX_PAGES: u32 = 10;

/// Items requested per page; the API maximum.
pub const PER_PAGE: u32 = 100;

/// Pause between consecutive pages, independent of any rate-limit signal.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);

/// Floor and cushion applied to the rate-limit reset wait (5 seconds).
pub const RATE_LIMIT_CUSHION_SECS: i64 = 5;

/// Backoff step for retryable server errors; the wait is `step * attempt`.
pub const SERVER_ERROR_BACKOFF_STEP: Duration = Duration::from_millis(1500);

/// Remaining-quota response header.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Quota reset (unix seconds) response header.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";
