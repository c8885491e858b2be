//! Configuration structures and environment variable handling.
//!
//! Each binary loads a fixed, named set of credentials from the process
//! environment before any network activity. A missing or empty required
//! value fails fast with an error naming the variable; the binary never
//! constructs an API client in that case. Secrets are held only in memory
//! and are never logged in full — at most a masked prefix at debug level.

use std::env;

use thiserror::Error;
use tracing::{debug, info};

/// Failure to assemble a credential set from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing required environment variable '{0}'.")]
    MissingVariable(&'static str),
}

/// Credentials for the Reddit API (app-only OAuth).
///
/// All three values are required; they are read from `REDDIT_CLIENT_ID`,
/// `REDDIT_CLIENT_SECRET`, and `REDDIT_USER_AGENT`.
#[derive(Debug, Clone)]
pub struct RedditConfig {
    /// The application client ID from the Reddit app settings.
    pub client_id: String,
    /// The application client secret.
    pub client_secret: String,
    /// User-agent string identifying this script to Reddit.
    pub user_agent: String,
}

impl RedditConfig {
    /// Loads Reddit credentials from environment variables.
    ///
    /// # Returns
    ///
    /// - `Ok(RedditConfig)`: If every required variable is present and non-empty
    /// - `Err(ConfigError)`: Naming the first missing variable
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = require_env("REDDIT_CLIENT_ID")?;
        let client_secret = require_env("REDDIT_CLIENT_SECRET")?;
        let user_agent = require_env("REDDIT_USER_AGENT")?;

        debug!("Client ID (masked): {}", mask_secret(&client_id));
        info!("Loaded Reddit credentials from the environment.");

        Ok(RedditConfig {
            client_id,
            client_secret,
            user_agent,
        })
    }
}

/// Credentials for the Twitter/X API.
///
/// The consumer key/secret and access token/secret are required; they are
/// read from `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`,
/// `TWITTER_ACCESS_TOKEN`, and `TWITTER_ACCESS_SECRET`. An app-only bearer
/// token (`TWITTER_BEARER_TOKEN`) is optional and only used for read-only
/// endpoints; its absence does not fail validation.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// The API consumer key (client identifier).
    pub consumer_key: String,
    /// The API consumer secret.
    pub consumer_secret: String,
    /// The user-context access token used to authenticate the like action.
    pub access_token: String,
    /// The access token secret paired with the access token.
    pub access_secret: String,
    /// Optional app-only bearer token for read-only operations.
    pub bearer_token: Option<String>,
}

impl TwitterConfig {
    /// Loads Twitter credentials from environment variables.
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If every required variable is present and non-empty
    /// - `Err(ConfigError)`: Naming the first missing variable
    pub fn from_env() -> Result<Self, ConfigError> {
        let consumer_key = require_env("TWITTER_CONSUMER_KEY")?;
        let consumer_secret = require_env("TWITTER_CONSUMER_SECRET")?;
        let access_token = require_env("TWITTER_ACCESS_TOKEN")?;
        let access_secret = require_env("TWITTER_ACCESS_SECRET")?;

        // Optional: app-only bearer token. Empty counts as absent.
        let bearer_token = env::var("TWITTER_BEARER_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        debug!("Consumer key (masked): {}", mask_secret(&consumer_key));
        debug!("Consumer secret (masked): {}", mask_secret(&consumer_secret));
        debug!("Access token (masked): {}", mask_secret(&access_token));
        debug!("Access secret (masked): {}", mask_secret(&access_secret));
        if bearer_token.is_some() {
            info!("Loaded Twitter credentials from the environment (bearer token present).");
        } else {
            info!("Loaded Twitter credentials from the environment (no bearer token).");
        }

        Ok(TwitterConfig {
            consumer_key,
            consumer_secret,
            access_token,
            access_secret,
            bearer_token,
        })
    }
}

/// Reads a required environment variable, treating empty values as missing.
fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(name)),
    }
}

/// Masks a secret for debug logging, keeping at most the first 8 bytes,
/// backed off to a character boundary.
pub(crate) fn mask_secret(secret: &str) -> String {
    let mut prefix_len = secret.len().min(8);
    while !secret.is_char_boundary(prefix_len) {
        prefix_len -= 1;
    }
    format!("{}...", &secret[..prefix_len])
}
