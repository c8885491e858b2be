//! Bounded retry policy around a single API action.
//!
//! [`execute_with_policy`] wraps exactly one API call. Terminal failures are
//! logged once and returned; the two recoverable classifications (rate limit,
//! upstream 5xx) sleep and retry the action exactly once. A second failure of
//! any kind is always terminal. Every classified event produces exactly one
//! log line here, so callers only map `Err` to a non-zero exit code.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, warn};

use crate::error::ApiError;

/// Minimum wait applied to a rate-limit retry, even when the reset timestamp
/// is absent, malformed, or already in the past.
const RATE_LIMIT_FLOOR_SECS: u64 = 10;

/// Fixed wait applied before retrying after an upstream server error.
const SERVER_ERROR_WAIT_SECS: u64 = 10;

/// Computes the rate-limit wait as `max(reset − now, 10)` seconds.
///
/// # Parameters
///
/// - `reset`: Epoch seconds at which the rate-limit window resets, if the
///   response carried one; `None` falls back to the current time
/// - `now`: Current time in epoch seconds
///
/// # Returns
///
/// The wait duration before the retry attempt, never below the 10-second
/// floor and never negative.
pub fn rate_limit_wait(reset: Option<i64>, now: i64) -> Duration {
    let reset = reset.unwrap_or(now);
    let wait = (reset - now).max(RATE_LIMIT_FLOOR_SECS as i64);
    Duration::from_secs(wait as u64)
}

/// Runs one API action under the error classification and retry policy.
///
/// The closure is invoked once; on a recoverable failure it is invoked a
/// second and final time after the policy's sleep. At most one retry occurs
/// per call regardless of which recoverable condition triggered it, and a
/// failure of the retry itself is terminal whatever its classification.
///
/// # Parameters
///
/// - `operation`: Human-readable name for the action (for logging)
/// - `attempt`: Closure performing the action; called at most twice
///
/// # Returns
///
/// - `Ok(T)`: The action's result, from the first attempt or the retry
/// - `Err(ApiError)`: The terminal failure, already logged exactly once
pub async fn execute_with_policy<T, F, Fut>(operation: &str, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let first_failure = match attempt().await {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    match first_failure {
        ApiError::RateLimited { reset } => {
            let wait = rate_limit_wait(reset, Utc::now().timestamp());
            warn!(
                "Rate limit exceeded for '{}'! Sleeping for {} seconds before retrying...",
                operation,
                wait.as_secs()
            );
            // One extra second past the reset, matching the observed window
            // rollover behavior.
            tokio::time::sleep(wait + Duration::from_secs(1)).await;
            retry_once(operation, attempt).await
        }
        ApiError::ServerError { status } => {
            warn!(
                "Upstream server error ({}) for '{}'. Retrying once in {} seconds...",
                status, operation, SERVER_ERROR_WAIT_SECS
            );
            tokio::time::sleep(Duration::from_secs(SERVER_ERROR_WAIT_SECS)).await;
            retry_once(operation, attempt).await
        }
        terminal => {
            error!("{}", terminal);
            Err(terminal)
        }
    }
}

/// Performs the single permitted retry. Any failure here is terminal: it is
/// logged as still-failing and returned without further classification.
async fn retry_once<T, F, Fut>(operation: &str, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match attempt().await {
        Ok(value) => Ok(value),
        Err(err) => {
            error!("Still failing after retry of '{}': {}", operation, err);
            Err(err)
        }
    }
}
