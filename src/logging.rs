//! Logging initialization for the command-line binaries.
//!
//! Each binary calls [`init_logging`] once at startup. Log lines carry a
//! timestamp, severity, and message, and are written simultaneously to
//! stdout and to an append-only file `<dir>/<app_name>.log`. The directory
//! defaults to `./logs` and can be overridden with `SOCIAL_ACTIONS_LOG_DIR`.
//! The file sink writes synchronously so the final lines of a short-lived
//! invocation are never lost on exit.

use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Failure to set up the logging sinks.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("failed to create log directory '{dir}': {source}")]
    CreateDir {
        /// The directory that could not be created.
        dir: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// A global subscriber was already installed.
    #[error("logging setup failed: {0}")]
    Init(String),
}

/// Initializes the global tracing subscriber with stdout and file sinks.
///
/// The log level filter comes from `RUST_LOG`, defaulting to `info`.
/// Subsequent calls are no-ops and return the originally resolved path.
///
/// # Parameters
///
/// - `app_name`: Logical name of the binary; becomes the log file stem
///
/// # Returns
///
/// The path of the append-only log file.
pub fn init_logging(app_name: &str) -> Result<PathBuf, LoggingError> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let log_dir = std::env::var("SOCIAL_ACTIONS_LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDir {
        dir: log_dir.clone(),
        source,
    })?;

    let log_filename = format!("{}.log", app_name);
    let full_path = PathBuf::from(&log_dir).join(&log_filename);

    // rolling::never is a plain append-only file; no rotation, no background
    // writer thread to flush.
    let file_appender = rolling::never(&log_dir, log_filename);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stdout))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}
