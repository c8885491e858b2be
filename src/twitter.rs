//! Twitter/X API adapter.
//!
//! This module performs the one Twitter operation the scripts need: mark a
//! tweet as liked by the authenticated user, via the API v2 likes endpoint.
//! Authentication uses the OAuth 2.0 User Context access token; the user ID
//! the likes endpoint requires is resolved from `/2/users/me` inside the
//! same operation, so the whole action runs under the retry policy.

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::TwitterConfig;
use crate::error::{error_from_response, ApiError};

const API_BASE_URL: &str = "https://api.x.com/2";

/// Outcome of a like request that completed without a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The tweet is now liked by the authenticated user.
    Liked,
    /// The API answered successfully but reported no actionable data, e.g.
    /// the target tweet no longer exists. The driver logs a warning for
    /// this; it is not an error and is never retried.
    NothingToDo,
}

/// Twitter API client handle.
///
/// Constructed once per invocation from a [`TwitterConfig`]; no network
/// activity happens until [`TwitterClient::like_tweet`] is called.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    config: TwitterConfig,
}

impl TwitterClient {
    /// Creates a client handle from a loaded credential set.
    pub fn new(config: TwitterConfig) -> Self {
        TwitterClient {
            http: Client::new(),
            config,
        }
    }

    /// Likes a tweet by ID as the authenticated user.
    ///
    /// Resolves the authenticated user's ID, then posts the like. Both
    /// requests authenticate with the OAuth 2.0 User Context access token.
    ///
    /// # Parameters
    ///
    /// - `tweet_id`: The unique ID of the tweet to like
    ///
    /// # Returns
    ///
    /// - `Ok(LikeOutcome)`: The like succeeded, or the API reported nothing
    ///   actionable (see [`LikeOutcome::NothingToDo`])
    /// - `Err(ApiError)`: A classified failure from either request
    pub async fn like_tweet(&self, tweet_id: &str) -> Result<LikeOutcome, ApiError> {
        let user_id = self.authenticated_user_id().await?;

        let url = format!("{}/users/{}/likes", API_BASE_URL, user_id);
        info!("Sending like request for tweet ID {} as user {}", tweet_id, user_id);
        debug!("Like URL: {}", url);

        let payload = json!({ "tweet_id": tweet_id });

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        // Surface the remaining rate-limit budget after a successful like.
        match rate_limit_status(response.headers()) {
            Some((remaining, reset)) => {
                info!("Rate limit remaining: {}", remaining);
                info!("Rate limit reset: {}", reset);
            }
            None => warn!("No rate limit headers found in the like response."),
        }

        let body = response.text().await?;
        debug!("Like response body: {} bytes", body.len());
        Ok(parse_like_response(&body))
    }

    /// Resolves the authenticated user's ID via `/2/users/me`.
    async fn authenticated_user_id(&self) -> Result<String, ApiError> {
        let url = format!("{}/users/me", API_BASE_URL);
        debug!("Resolving authenticated user via {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let payload: Value = response.json().await?;
        match payload
            .get("data")
            .and_then(|data| data.get("id"))
            .and_then(|id| id.as_str())
        {
            Some(id) => {
                debug!("Authenticated user ID: {}", id);
                Ok(id.to_string())
            }
            None => Err(ApiError::Unexpected {
                status: 200,
                detail: "users/me response carried no user ID".to_string(),
            }),
        }
    }

    /// Builds the Authorization header for OAuth 2.0 User Context
    /// authentication, as required by the v2 likes endpoint.
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.access_token)
    }
}

/// Reads the rate-limit budget headers from a like response.
///
/// Returns the remaining-request count and reset timestamp as reported by
/// the API, or `None` when either header is absent or unreadable.
pub(crate) fn rate_limit_status(headers: &HeaderMap) -> Option<(String, String)> {
    let remaining = headers
        .get("x-rate-limit-remaining")
        .and_then(|value| value.to_str().ok())?;
    let reset = headers
        .get("x-rate-limit-reset")
        .and_then(|value| value.to_str().ok())?;
    Some((remaining.to_string(), reset.to_string()))
}

/// Interprets a successful like-response body.
///
/// `{"data": {"liked": true}}` means the like took effect. A 2xx body with
/// no `data` object, or with `liked` anything other than `true`, means the
/// API had nothing to act on.
pub(crate) fn parse_like_response(body: &str) -> LikeOutcome {
    let liked = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .get("data")
                .and_then(|data| data.get("liked"))
                .and_then(|liked| liked.as_bool())
        })
        .unwrap_or(false);

    if liked {
        LikeOutcome::Liked
    } else {
        LikeOutcome::NothingToDo
    }
}
