//! Reddit Fetch Script
//!
//! Authenticates with the Reddit API using app-only OAuth and retrieves the
//! newest posts from a subreddit, logging each post's title, author, and
//! score to the console and to an append-only log file.
//!
//! Usage:
//!     1. Set `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`, and
//!        `REDDIT_USER_AGENT` in the environment.
//!     2. Run: `reddit_fetch <subreddit>` (e.g. `reddit_fetch python`)

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use social_actions::{execute_with_policy, init_logging, RedditClient, RedditConfig};

/// Fetch the newest posts from a subreddit.
#[derive(Debug, Parser)]
#[command(name = "reddit_fetch")]
struct Args {
    /// Name of the subreddit (e.g. python), without the r/ prefix.
    subreddit: String,
    /// Number of posts to fetch.
    #[arg(long, default_value_t = 5)]
    limit: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging("reddit_fetch") {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // Credentials are validated before any network call; a missing value
    // aborts here and the client is never constructed.
    let config = match RedditConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{} Exiting.", e);
            return ExitCode::FAILURE;
        }
    };

    let client = RedditClient::new(config);
    let posts = match execute_with_policy("fetch_newest", || {
        client.fetch_newest(&args.subreddit, args.limit)
    })
    .await
    {
        Ok(posts) => posts,
        // The policy wrapper already logged the classified failure.
        Err(_) => return ExitCode::FAILURE,
    };

    info!("Latest {} posts from r/{}:", posts.len(), args.subreddit);
    for post in &posts {
        info!("Title: {}", post.title);
        info!("Author: {}", post.author);
        info!("Score: {}", post.score);
        info!("----------------------------------------");
    }

    ExitCode::SUCCESS
}
