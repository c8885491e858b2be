//! Error taxonomy and HTTP response classification.
//!
//! Every failure raised while performing an API action is classified into
//! exactly one [`ApiError`] variant. The retry policy in [`crate::retry`]
//! keys off this classification: rate limits and upstream server errors are
//! recoverable (one bounded retry), everything else is terminal.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Classified failure raised by an API action.
///
/// The variants mirror the fixed outcome set an action can end in:
/// authentication, permission, not-found, and bad-request failures are
/// terminal; [`ApiError::RateLimited`] and [`ApiError::ServerError`] are
/// eligible for exactly one retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 response: credentials are invalid or expired.
    #[error("Unauthorized: invalid or expired API credentials. Check your keys.")]
    AuthenticationFailed,

    /// 403 response: the action is not allowed (resource protected, already
    /// actioned, or insufficient scope).
    #[error("Forbidden: action not allowed (resource may be protected or already actioned).")]
    PermissionDenied,

    /// 404 response: the target post or tweet does not exist.
    #[error("Not found: the requested resource does not exist or was deleted.")]
    NotFound,

    /// 400 response with a parameter name discoverable in the error payload.
    #[error("Bad request: invalid value for parameter '{name}'.")]
    InvalidParameter {
        /// Name of the offending request parameter.
        name: String,
    },

    /// 400 response with no identifiable parameter in the payload.
    #[error("Bad request: one or more parameters in the request were invalid.")]
    BadRequest,

    /// 429 response: rate limit exceeded.
    #[error("Rate limit exceeded.")]
    RateLimited {
        /// Epoch seconds at which the rate-limit window resets, when the
        /// response carried a reset header.
        reset: Option<i64>,
    },

    /// 5xx response from the upstream API.
    #[error("Upstream server error ({status}).")]
    ServerError {
        /// The HTTP status code received.
        status: u16,
    },

    /// Transport-level failure (connection, TLS, timeout, body decode).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other response the taxonomy does not cover.
    #[error("Unexpected API error ({status}): {detail}")]
    Unexpected {
        /// The HTTP status code received.
        status: u16,
        /// Sanitized snippet of the response body.
        detail: String,
    },
}

impl ApiError {
    /// Returns true for the two recoverable classifications, which are
    /// eligible for exactly one retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited { .. } | ApiError::ServerError { .. }
        )
    }
}

/// Classifies a non-success HTTP response into an [`ApiError`].
///
/// # Parameters
///
/// - `status`: The HTTP status code of the failed response
/// - `rate_limit_reset`: The parsed rate-limit reset header value (epoch
///   seconds), if the response carried one
/// - `body`: The raw response body, consulted for parameter names on 400s
///
/// # Returns
///
/// Exactly one [`ApiError`] variant per the classification table. Statuses
/// outside the table become [`ApiError::Unexpected`] with a sanitized body
/// snippet.
pub(crate) fn classify_response(
    status: StatusCode,
    rate_limit_reset: Option<i64>,
    body: &str,
) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed,
        StatusCode::FORBIDDEN => ApiError::PermissionDenied,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::BAD_REQUEST => match extract_invalid_parameter(body) {
            Some(name) => ApiError::InvalidParameter { name },
            None => ApiError::BadRequest,
        },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            reset: rate_limit_reset,
        },
        s if s.is_server_error() => ApiError::ServerError { status: s.as_u16() },
        s => ApiError::Unexpected {
            status: s.as_u16(),
            detail: sanitize_for_logging(body, 200),
        },
    }
}

/// Consumes a failed [`Response`] and classifies it.
///
/// Reads the rate-limit reset header (both the Twitter and the Reddit
/// spelling) and the body, then delegates to [`classify_response`]. A body
/// that cannot be read is treated as empty rather than masking the
/// classification.
pub(crate) async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let reset = ["x-rate-limit-reset", "x-ratelimit-reset"]
        .iter()
        .find_map(|name| response.headers().get(*name))
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok());
    let body = response.text().await.unwrap_or_default();
    classify_response(status, reset, &body)
}

/// Pulls the first offending parameter name out of a 400 error payload.
///
/// Both APIs report bad requests as a JSON document with an `errors` array
/// whose entries may carry a `parameters` object keyed by parameter name.
/// Returns the first key found, or `None` when the payload has no
/// recognizable shape.
fn extract_invalid_parameter(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    let errors = payload.get("errors")?.as_array()?;
    for error in errors {
        if let Some(parameters) = error.get("parameters").and_then(|p| p.as_object()) {
            if let Some(name) = parameters.keys().next() {
                return Some(name.clone());
            }
        }
    }
    None
}

/// Sanitizes text for safe logging by truncating and collapsing control
/// characters, so an arbitrary response body cannot flood or fake log lines.
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        // Back off to a character boundary so a multi-byte character
        // straddling the cap cannot panic the slice.
        let mut cut = max_len;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated]", &sanitized[..cut])
    } else {
        sanitized
    }
}
