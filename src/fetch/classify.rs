//! Response classification for retry decisions.
//!
//! Every response is reduced to a [`Verdict`] before the executor looks at its
//! body. Quota exhaustion and server faults recover differently: the former
//! has an exact resume time dictated by the server, the latter is spaced out
//! by the client.
//!
//! # Status Classification
//!
//! | Status | Condition | Verdict |
//! |--------|-----------|---------|
//! | 403, 429 | `X-RateLimit-Remaining: 0` | RateLimited |
//! | 403, 429 | remaining > 0 or header absent | Fatal |
//! | 500, 502, 503, 504 | - | RetryableServerError |
//! | other 2xx | - | Success |
//! | anything else | - | Fatal |

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::{debug, instrument};

use super::constants::{
    RATE_LIMIT_CUSHION_SECS, RATE_LIMIT_REMAINING_HEADER, RATE_LIMIT_RESET_HEADER,
};

/// Outcome of a single request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 2xx response; the body should be parsed and returned.
    Success,

    /// Quota exhausted; retry once the server-announced reset has passed.
    RateLimited {
        /// How long to wait before the next attempt.
        wait: Duration,
    },

    /// Temporary server-side failure (500/502/503/504).
    RetryableServerError,

    /// Any other failure; retrying would not help.
    Fatal,
}

/// Classifies a response from its status code and headers.
///
/// `now_unix` is the current time in unix seconds, used to turn the
/// `X-RateLimit-Reset` timestamp into a wait.
#[instrument(skip(headers))]
pub fn classify(status: StatusCode, headers: &HeaderMap, now_unix: i64) -> Verdict {
    if is_quota_rejection(status) && remaining_quota(headers) == Some(0) {
        let reset = header_value::<i64>(headers, RATE_LIMIT_RESET_HEADER).unwrap_or(0);
        let wait = rate_limit_wait(reset, now_unix);
        debug!(reset, now_unix, wait_secs = wait.as_secs(), "quota exhausted");
        return Verdict::RateLimited { wait };
    }

    match status.as_u16() {
        500 | 502 | 503 | 504 => Verdict::RetryableServerError,
        _ if status.is_success() => Verdict::Success,
        _ => Verdict::Fatal,
    }
}

/// Computes the wait before retrying after quota exhaustion.
///
/// Formula: `max(5, reset - now + 5)` seconds. The floor covers clock skew
/// (a reset already in the past), the cushion lets the reset take effect.
#[must_use]
pub fn rate_limit_wait(reset_unix: i64, now_unix: i64) -> Duration {
    let secs = reset_unix
        .saturating_sub(now_unix)
        .saturating_add(RATE_LIMIT_CUSHION_SECS)
        .max(RATE_LIMIT_CUSHION_SECS);
    Duration::from_secs(secs.unsigned_abs())
}

/// Current wall-clock time in unix seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn is_quota_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    )
}

fn remaining_quota(headers: &HeaderMap) -> Option<u64> {
    header_value::<u64>(headers, RATE_LIMIT_REMAINING_HEADER)
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    const NOW: i64 = 1_700_000_000;

    fn rate_limit_headers(remaining: &str, reset: i64) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            RATE_LIMIT_REMAINING_HEADER,
            HeaderValue::from_str(remaining).unwrap(),
        );
        headers.insert(
            RATE_LIMIT_RESET_HEADER,
            HeaderValue::from_str(&reset.to_string()).unwrap(),
        );
        headers
    }

    // ==================== Wait Computation Tests ====================

    #[test]
    fn test_rate_limit_wait_adds_cushion_to_future_reset() {
        assert_eq!(rate_limit_wait(NOW + 100, NOW), Duration::from_secs(105));
    }

    #[test]
    fn test_rate_limit_wait_floors_past_reset() {
        assert_eq!(rate_limit_wait(NOW - 50, NOW), Duration::from_secs(5));
    }

    #[test]
    fn test_rate_limit_wait_reset_now_is_cushion() {
        assert_eq!(rate_limit_wait(NOW, NOW), Duration::from_secs(5));
    }

    #[test]
    fn test_rate_limit_wait_missing_reset_floors() {
        // A reset of 0 (header missing) is decades in the past.
        assert_eq!(rate_limit_wait(0, NOW), Duration::from_secs(5));
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_classify_403_exhausted_quota_is_rate_limited() {
        let headers = rate_limit_headers("0", NOW + 100);
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &headers, NOW),
            Verdict::RateLimited {
                wait: Duration::from_secs(105)
            }
        );
    }

    #[test]
    fn test_classify_429_exhausted_quota_is_rate_limited() {
        let headers = rate_limit_headers("0", NOW - 50);
        assert_eq!(
            classify(StatusCode::TOO_MANY_REQUESTS, &headers, NOW),
            Verdict::RateLimited {
                wait: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn test_classify_403_with_remaining_quota_is_fatal() {
        let headers = rate_limit_headers("12", NOW + 100);
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &headers, NOW),
            Verdict::Fatal
        );
    }

    #[test]
    fn test_classify_403_without_headers_is_fatal() {
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &HeaderMap::new(), NOW),
            Verdict::Fatal
        );
    }

    #[test]
    fn test_classify_403_missing_reset_waits_floor() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("0"));
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &headers, NOW),
            Verdict::RateLimited {
                wait: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn test_classify_exhausted_headers_on_success_are_ignored() {
        let headers = rate_limit_headers("0", NOW + 100);
        assert_eq!(classify(StatusCode::OK, &headers, NOW), Verdict::Success);
    }

    #[test]
    fn test_classify_server_errors_are_retryable() {
        for code in [500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(
                classify(status, &HeaderMap::new(), NOW),
                Verdict::RetryableServerError,
                "status {code} should be retryable"
            );
        }
    }

    #[test]
    fn test_classify_501_is_fatal() {
        assert_eq!(
            classify(StatusCode::NOT_IMPLEMENTED, &HeaderMap::new(), NOW),
            Verdict::Fatal
        );
    }

    #[test]
    fn test_classify_2xx_is_success() {
        assert_eq!(
            classify(StatusCode::OK, &HeaderMap::new(), NOW),
            Verdict::Success
        );
        assert_eq!(
            classify(StatusCode::ACCEPTED, &HeaderMap::new(), NOW),
            Verdict::Success
        );
    }

    #[test]
    fn test_classify_client_errors_are_fatal() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            assert_eq!(classify(status, &HeaderMap::new(), NOW), Verdict::Fatal);
        }
    }
}
