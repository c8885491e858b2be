//! Twitter Like Script
//!
//! Authenticates with the Twitter/X API and likes a tweet by ID, logging the
//! outcome to the console and to an append-only log file.
//!
//! Usage:
//!     1. Set `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`,
//!        `TWITTER_ACCESS_TOKEN`, and `TWITTER_ACCESS_SECRET` in the
//!        environment (`TWITTER_BEARER_TOKEN` is optional).
//!     2. Run: `twitter_like <tweet_id>`. For the tweet at
//!        `https://x.com/lexfridman/status/1895770434580464107` the tweet ID
//!        is `1895770434580464107`.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use social_actions::{execute_with_policy, init_logging, LikeOutcome, TwitterClient, TwitterConfig};

/// Like a tweet by ID using the Twitter API.
#[derive(Debug, Parser)]
#[command(name = "twitter_like")]
struct Args {
    /// The unique ID of the tweet to like.
    tweet_id: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging("twitter_like") {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // Credentials are validated before any network call; a missing value
    // aborts here and the client is never constructed.
    let config = match TwitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{} Exiting.", e);
            return ExitCode::FAILURE;
        }
    };

    let client = TwitterClient::new(config);
    let outcome = match execute_with_policy("like_tweet", || client.like_tweet(&args.tweet_id)).await
    {
        Ok(outcome) => outcome,
        // The policy wrapper already logged the classified failure.
        Err(_) => return ExitCode::FAILURE,
    };

    match outcome {
        LikeOutcome::Liked => {
            info!("Successfully liked tweet ID: {}.", args.tweet_id);
        }
        LikeOutcome::NothingToDo => {
            warn!(
                "Like request for tweet ID {} returned no actionable data; the tweet may no longer exist.",
                args.tweet_id
            );
        }
    }

    ExitCode::SUCCESS
}
