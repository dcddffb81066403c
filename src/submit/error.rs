/// Message shown to the customer for any failed submission.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "There was an error submitting your booking. Please try again.";

/// Errors that can occur while handing a booking to the intake service.
///
/// The variants are kept apart for logging only; the form collapses all of
/// them into a single failed state with [`SUBMISSION_FAILED_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request never got a response (DNS, connect, TLS, timeout).
    #[error("could not reach booking service: {0}")]
    Network(#[source] reqwest::Error),

    /// The intake service refused the booking (4xx).
    #[error("booking rejected by intake service (HTTP {status})")]
    Rejected {
        /// HTTP status code returned.
        status: u16,
    },

    /// The intake service failed while handling the booking (5xx).
    #[error("intake service error (HTTP {status})")]
    Server {
        /// HTTP status code returned.
        status: u16,
    },

    /// An I/O error occurred reading an attachment or writing the outbox.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The booking could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The submission task was dropped before it produced a result.
    #[error("submission was cancelled")]
    Cancelled,
}

impl SubmitError {
    /// The customer-facing message for this error.
    pub fn user_message(&self) -> &'static str {
        SUBMISSION_FAILED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_shows_the_same_message() {
        let errors = [
            SubmitError::Rejected { status: 422 },
            SubmitError::Server { status: 503 },
            SubmitError::Io(std::io::Error::other("disk full")),
            SubmitError::Cancelled,
        ];
        for err in &errors {
            assert_eq!(err.user_message(), SUBMISSION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn display_keeps_the_detail() {
        assert_eq!(
            SubmitError::Rejected { status: 422 }.to_string(),
            "booking rejected by intake service (HTTP 422)"
        );
        assert_eq!(
            SubmitError::Server { status: 502 }.to_string(),
            "intake service error (HTTP 502)"
        );
    }
}
