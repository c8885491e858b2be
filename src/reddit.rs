//! Reddit API adapter.
//!
//! This module performs the one Reddit operation the scripts need: fetch the
//! newest N submissions from a subreddit. Authentication uses the app-only
//! OAuth2 `client_credentials` grant, so only a client ID, client secret,
//! and user-agent string are required. Failures are classified into
//! [`ApiError`] for the retry policy.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::RedditConfig;
use crate::error::{error_from_response, ApiError};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

/// One subreddit submission, in the shape the fetch driver logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// The submission title.
    pub title: String,
    /// The submitting user's name.
    pub author: String,
    /// The submission score (upvotes minus downvotes).
    pub score: i64,
}

/// Response body of the app-only token grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// A `/new` listing response, pared down to the fields the driver uses.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Post,
}

/// Reddit API client handle.
///
/// Constructed once per invocation from a [`RedditConfig`]; no network
/// activity happens until [`RedditClient::fetch_newest`] is called, so the
/// whole operation (token grant plus listing request) runs under the retry
/// policy.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: Client,
    config: RedditConfig,
}

impl RedditClient {
    /// Creates a client handle from a loaded credential set.
    pub fn new(config: RedditConfig) -> Self {
        RedditClient {
            http: Client::new(),
            config,
        }
    }

    /// Fetches the newest `limit` submissions from `r/<subreddit>`.
    ///
    /// Obtains an app-only access token, then requests the `/new` listing.
    /// Posts are returned in the order the API reports them; no re-sorting.
    ///
    /// # Parameters
    ///
    /// - `subreddit`: The subreddit name, without the `r/` prefix
    /// - `limit`: Maximum number of submissions to request
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Post>)`: The newest submissions, newest first
    /// - `Err(ApiError)`: A classified failure from either request
    pub async fn fetch_newest(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, ApiError> {
        let token = self.obtain_access_token().await?;

        let url = format!("{}/r/{}/new", OAUTH_BASE_URL, subreddit);
        info!("Requesting {} newest posts from r/{}", limit, subreddit);
        debug!("Listing URL: {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .header("Authorization", format!("Bearer {}", token))
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        let posts = parse_listing(&body)?;
        info!("Fetched {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    /// Performs the app-only `client_credentials` token grant.
    async fn obtain_access_token(&self) -> Result<String, ApiError> {
        debug!("Requesting app-only access token from {}", TOKEN_URL);

        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("User-Agent", &self.config.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let token: TokenResponse = response.json().await?;
        debug!("Obtained app-only access token.");
        Ok(token.access_token)
    }
}

/// Deserializes a `/new` listing body into ordered posts.
///
/// A success response that does not match the listing shape is a classified
/// unexpected failure rather than a panic or silent empty result.
pub(crate) fn parse_listing(body: &str) -> Result<Vec<Post>, ApiError> {
    let listing: Listing = serde_json::from_str(body).map_err(|e| ApiError::Unexpected {
        status: 200,
        detail: format!("malformed listing response: {}", e),
    })?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data)
        .collect())
}
