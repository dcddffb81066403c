use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::places::PlacesError;
use crate::submit::SubmitError;

/// Errors that can stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime startup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The booking sink could not be built.
    #[error("Submission setup error: {0}")]
    Submit(#[from] SubmitError),

    /// The address lookup client could not be built.
    #[error("Address lookup setup error: {0}")]
    Places(#[from] PlacesError),
}
