use std::fmt;

/// Lifecycle of a single booking submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// The intake service acknowledged the booking; the thank-you view is shown.
    Success,
    /// The last attempt failed; entered data is kept for a retry.
    Error,
}

impl SubmissionStatus {
    /// Text for the submit control in this state.
    pub fn button_label(self) -> &'static str {
        match self {
            SubmissionStatus::Submitting => "Submitting...",
            _ => "Book Now",
        }
    }
}

#[mutants::skip]
impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Which view the form component renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    ThankYou,
}
