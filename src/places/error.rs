use std::time::Duration;

/// Errors from the address-autocomplete integration.
///
/// None of these are fatal: on any of them the address field stays a plain
/// text input.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// The lookup service could not be reached or rejected the API key.
    #[error("address lookup failed to load")]
    ScriptFailed,

    /// Waiting for the lookup service took longer than allowed.
    #[error("address lookup not ready after {0:?}")]
    Timeout(Duration),

    /// The loader was dropped while a subscriber was still waiting on it.
    #[error("address lookup loader went away")]
    LoaderDropped,

    /// A lookup request failed in transit.
    #[error("places request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The places service answered with a non-success status.
    #[error("places service returned HTTP {0}")]
    Status(u16),

    /// The widget refused to bind to the address field.
    #[error("address autocomplete could not attach: {0}")]
    Attach(String),
}
