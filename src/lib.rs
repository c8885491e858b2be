//! # social-actions
//!
//! Library backing two command-line scripts: `reddit_fetch`, which retrieves
//! the newest posts from a subreddit, and `twitter_like`, which likes a
//! tweet by ID. Each script loads credentials from the environment, performs
//! exactly one API action, and logs results to the console and an
//! append-only log file.
//!
//! ## Error handling and retry
//!
//! Every failure from an API call is classified into a fixed taxonomy
//! ([`ApiError`]). Rate limits and upstream server errors trigger exactly
//! one bounded retry ([`execute_with_policy`]); every other classification,
//! and any failure of the retry itself, terminates the invocation with a
//! logged message and a non-zero exit code.
//!
//! ## Environment Variables
//!
//! Reddit (`reddit_fetch`):
//! - `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`, `REDDIT_USER_AGENT`
//!
//! Twitter (`twitter_like`):
//! - `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`,
//!   `TWITTER_ACCESS_TOKEN`, `TWITTER_ACCESS_SECRET`
//! - `TWITTER_BEARER_TOKEN` (optional)
//!
//! Both:
//! - `SOCIAL_ACTIONS_LOG_DIR` (optional, defaults to `./logs`)
//! - `RUST_LOG` (optional log filter, defaults to `info`)

pub mod config;
pub mod error;
pub mod logging;
pub mod reddit;
pub mod retry;
pub mod twitter;

pub use config::{ConfigError, RedditConfig, TwitterConfig};
pub use error::ApiError;
pub use logging::init_logging;
pub use reddit::{Post, RedditClient};
pub use retry::{execute_with_policy, rate_limit_wait};
pub use twitter::{LikeOutcome, TwitterClient};
