//! Retry policy for transient search API failures.
//!
//! The [`RetryPolicy`] decides, after a failed attempt, whether another
//! attempt is made and how long to wait first.
//!
//! # Delay Schedule
//!
//! - [`Verdict::RateLimited`] - the wait computed from the reset header
//! - [`Verdict::RetryableServerError`] - `server_error_step * attempt`
//!   (1.5s, 3s, 4.5s, ... with defaults)
//!
//! Both kinds consume one of the bounded attempts. The wait is also taken
//! after the final attempt, before the executor gives up.
//!
//! # Example
//!
//! ```
//! use repo_harvester::{RetryDecision, RetryPolicy, Verdict};
//!
//! let policy = RetryPolicy::default();
//! match policy.should_retry(Verdict::RetryableServerError, 1) {
//!     RetryDecision::Retry { delay, attempt } => {
//!         println!("Retrying in {:?} (attempt {})", delay, attempt);
//!     }
//!     RetryDecision::DoNotRetry { reason } => {
//!         println!("Not retrying: {}", reason);
//!     }
//! }
//! ```

use std::time::Duration;

use tracing::{debug, instrument};

use super::Verdict;
use super::constants::SERVER_ERROR_BACKOFF_STEP;

/// Default maximum attempts per request (including the first).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Decision on whether to retry a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the request after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// Which attempt number this will be (1-indexed, so first retry is attempt 2).
        attempt: u32,
    },

    /// Do not retry the request.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Bounded-attempt retry configuration.
///
/// # Default Values
///
/// - `max_attempts`: 6
/// - `server_error_step`: 1.5 seconds
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,

    /// Linear backoff unit for retryable server errors.
    server_error_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            server_error_step: SERVER_ERROR_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with custom settings (`max_attempts` is raised to at least 1).
    #[must_use]
    pub fn new(max_attempts: u32, server_error_step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            server_error_step,
        }
    }

    /// Creates a policy with a custom `max_attempts`, using the default backoff step.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait owed after `attempt` (1-indexed) produced `verdict`.
    ///
    /// `None` for verdicts that never back off. The wait is owed even after
    /// the final attempt.
    #[must_use]
    pub fn backoff(&self, verdict: Verdict, attempt: u32) -> Option<Duration> {
        match verdict {
            Verdict::Success | Verdict::Fatal => None,
            Verdict::RateLimited { wait } => Some(wait),
            Verdict::RetryableServerError => Some(self.server_error_step.saturating_mul(attempt)),
        }
    }

    /// Determines whether to retry after `attempt` (1-indexed) produced `verdict`.
    #[instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub fn should_retry(&self, verdict: Verdict, attempt: u32) -> RetryDecision {
        let Some(delay) = self.backoff(verdict, attempt) else {
            let reason = if verdict == Verdict::Success {
                "request succeeded"
            } else {
                "fatal status - retry would not help"
            };
            return RetryDecision::DoNotRetry {
                reason: reason.to_string(),
            };
        };

        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            "will retry"
        );

        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }
}
