//! The booking form controller: field state, validation, dropdown
//! coordination and the submission state machine.

mod controller;
mod dropdown;
mod errors;
mod status;

pub use controller::{BookingFormController, Submission, SubmissionTicket, SubmitBlocked};
pub use dropdown::{CategoryExpansion, Dropdown, DropdownState};
pub use errors::ValidationErrors;
pub use status::{SubmissionStatus, View};
