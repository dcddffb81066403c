//! Tracing setup. The terminal belongs to the UI, so events go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `leadbook=debug`.
pub const LOG_ENV: &str = "LEADBOOK_LOG";

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("could not open log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber was already installed.
    #[error("could not install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, appending to `path`.
pub fn init(path: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;
    Ok(())
}
