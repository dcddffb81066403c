use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::dropdown::{CategoryExpansion, DropdownState};
use super::errors::ValidationErrors;
use super::status::{SubmissionStatus, View};
use crate::model::{
    Attachment, BookingFormState, BookingRequest, DateRange, Field, PreferredDate, PreferredTime,
    REQUIRED_TEXT_FIELDS, ServiceItem, Urgency, validate_services, validate_terms,
    validate_text_field,
};
use crate::submit::{BookingSink, SUBMISSION_FAILED_MESSAGE, SubmitError};

/// Identifies one submission attempt so a late result can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// A validated booking ready to hand to a [`BookingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub request: BookingRequest,
}

/// Why a submit action did not start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a booking is already being sent")]
    InFlight,
    #[error("{0} field(s) need attention")]
    Invalid(usize),
    #[error("the booking was already sent")]
    ThankYouShown,
}

/// Owns the booking form: field values, validation errors, dropdown state
/// and the submission lifecycle.
#[derive(Debug, Clone, Default)]
pub struct BookingFormController {
    state: BookingFormState,
    errors: ValidationErrors,
    dropdowns: DropdownState,
    expansion: CategoryExpansion,
    status: SubmissionStatus,
    attempted_submit: bool,
    show_manual_entry: bool,
    in_flight: Option<SubmissionTicket>,
    next_ticket: u64,
}

impl BookingFormController {
    /// Creates an empty form in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingFormState {
        &self.state
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn view(&self) -> View {
        match self.status {
            SubmissionStatus::Success => View::ThankYou,
            _ => View::Form,
        }
    }

    /// Returns `true` once the customer has tried to submit this form.
    pub fn attempted_submit(&self) -> bool {
        self.attempted_submit
    }

    pub fn dropdowns(&self) -> &DropdownState {
        &self.dropdowns
    }

    pub fn dropdowns_mut(&mut self) -> &mut DropdownState {
        &mut self.dropdowns
    }

    pub fn expansion(&self) -> &CategoryExpansion {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut CategoryExpansion {
        &mut self.expansion
    }

    /// Whether the manual-entry toggle next to the address is visible.
    pub fn show_manual_entry(&self) -> bool {
        self.show_manual_entry
    }

    /// Whether the submit control accepts activation.
    pub fn submit_enabled(&self) -> bool {
        self.status != SubmissionStatus::Submitting
    }

    /// The inline message shown under the submit control after a failure.
    pub fn submission_error(&self) -> Option<&'static str> {
        (self.status == SubmissionStatus::Error).then_some(SUBMISSION_FAILED_MESSAGE)
    }

    /// The error message to display for `field`, if any.
    ///
    /// Services and terms errors stay hidden until a submit has been attempted.
    pub fn visible_error(&self, field: Field) -> Option<String> {
        let gated = matches!(field, Field::Services | Field::TermsAccepted);
        if gated && !self.attempted_submit {
            return None;
        }
        self.errors.message(field)
    }

    // --- Field updates ---

    fn changed(&mut self, field: Field) {
        if self.errors.clear(field) {
            debug!(%field, "cleared validation error on change");
        }
    }

    /// Writes a free-text field. Non-text fields are ignored.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let Some(slot) = self.state.text_mut(field) else {
            debug!(%field, "set_text on a non-text field ignored");
            return;
        };
        *slot = value.into();
        self.changed(field);
    }

    pub fn set_manual_entry(&mut self, manual: bool) {
        self.state.manual_entry = manual;
        self.changed(Field::ManualEntry);
    }

    /// Ticks or unticks a service or category.
    pub fn set_service(&mut self, item: ServiceItem, selected: bool) {
        if selected {
            self.state.services.insert(item);
        } else {
            self.state.services.remove(&item);
        }
        self.changed(Field::Services);
    }

    pub fn toggle_service(&mut self, item: ServiceItem) {
        let selected = !self.state.services.contains(&item);
        self.set_service(item, selected);
    }

    pub fn set_preferred_time(&mut self, time: Option<PreferredTime>) {
        self.state.preferred_time = time;
        self.changed(Field::PreferredTime);
    }

    pub fn set_urgency(&mut self, urgency: Option<Urgency>) {
        self.state.urgency = urgency;
        self.changed(Field::Urgency);
    }

    /// Picks a specific date, discarding any range. Dates before `today`
    /// are not offered and are ignored; returns `false` in that case.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            debug!(%date, %today, "past date ignored");
            return false;
        }
        self.state.preferred_date = PreferredDate::Specific(date);
        self.changed(Field::PreferredDate);
        true
    }

    /// Picks a loose date window, discarding any specific date.
    pub fn select_date_range(&mut self, range: DateRange) {
        self.state.preferred_date = PreferredDate::Range(range);
        self.changed(Field::PreferredDate);
    }

    pub fn clear_preferred_date(&mut self) {
        self.state.preferred_date = PreferredDate::Unset;
        self.changed(Field::PreferredDate);
    }

    /// Replaces the whole attachment list with `files`.
    pub fn attach_files(&mut self, files: Vec<Attachment>) {
        self.state.files = files;
        self.changed(Field::Files);
    }

    pub fn set_newsletter(&mut self, subscribed: bool) {
        self.state.newsletter = subscribed;
        self.changed(Field::Newsletter);
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.state.terms_accepted = accepted;
        self.changed(Field::TermsAccepted);
    }

    /// The address field gained focus: reveal the manual-entry toggle.
    pub fn focus_address(&mut self) {
        self.show_manual_entry = true;
    }

    /// Writes an address chosen from autocomplete and validates it at once.
    pub fn apply_place(&mut self, formatted_address: impl Into<String>) {
        self.set_text(Field::Address, formatted_address);
        self.blur(Field::Address);
    }

    // --- Validation ---

    /// Runs the blur-time check for `field`. Returns `true` if it passed.
    ///
    /// Services and terms have no blur check; they are only validated on submit.
    pub fn blur(&mut self, field: Field) -> bool {
        let Some(value) = self.state.text(field) else {
            return true;
        };
        let result = validate_text_field(field, value);
        self.errors.record(field, result)
    }

    /// Runs every check, recording each failure. Returns `true` if the whole
    /// form is valid.
    pub fn validate_form(&mut self) -> bool {
        let mut valid = true;
        for field in REQUIRED_TEXT_FIELDS {
            valid &= self.blur(field);
        }
        valid &= self
            .errors
            .record(Field::Services, validate_services(&self.state.services));
        valid &= self
            .errors
            .record(Field::TermsAccepted, validate_terms(self.state.terms_accepted));
        valid
    }

    // --- Submission lifecycle ---

    /// Handles the submit action.
    ///
    /// Validates the whole form and, only if every check passes, moves to
    /// [`SubmissionStatus::Submitting`] and returns the request to send. A
    /// blocked submit leaves the status unchanged.
    pub fn submit(&mut self) -> Result<Submission, SubmitBlocked> {
        if self.status == SubmissionStatus::Success {
            return Err(SubmitBlocked::ThankYouShown);
        }
        self.attempted_submit = true;
        let valid = self.validate_form();

        if self.status == SubmissionStatus::Submitting {
            debug!("submit ignored while a booking is in flight");
            return Err(SubmitBlocked::InFlight);
        }
        if !valid {
            debug!(errors = self.errors.len(), "submit blocked by validation");
            return Err(SubmitBlocked::Invalid(self.errors.len()));
        }

        let ticket = SubmissionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.status = SubmissionStatus::Submitting;
        self.dropdowns.close_all();

        let request = BookingRequest::from_state(&self.state, Utc::now());
        info!(
            services = request.services.len(),
            files = request.files.len(),
            "submitting booking"
        );
        Ok(Submission { ticket, request })
    }

    /// Applies the outcome of the submission identified by `ticket`.
    ///
    /// Results for any other ticket are dropped. Returns `true` if applied.
    pub fn complete(&mut self, ticket: SubmissionTicket, outcome: Result<(), SubmitError>) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(?ticket, "stale submission result ignored");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                info!("booking accepted");
                self.reset_form();
                self.status = SubmissionStatus::Success;
            }
            Err(e) => {
                warn!(error = %e, "booking submission failed");
                self.status = SubmissionStatus::Error;
            }
        }
        true
    }

    /// Validates, sends through `sink`, and applies the outcome.
    ///
    /// A sink failure is not an error here: it leaves the form in
    /// [`SubmissionStatus::Error`] with the entered data intact.
    pub async fn submit_with(&mut self, sink: &dyn BookingSink) -> Result<(), SubmitBlocked> {
        let Submission { ticket, request } = self.submit()?;
        let outcome = sink.submit(request).await;
        self.complete(ticket, outcome);
        Ok(())
    }

    /// "Book another service" from the thank-you view: back to an empty form.
    pub fn book_another(&mut self) {
        if self.status != SubmissionStatus::Success {
            return;
        }
        self.reset_form();
        self.status = SubmissionStatus::Idle;
    }

    /// Drops every piece of entered data and per-attempt UI state.
    fn reset_form(&mut self) {
        self.state = BookingFormState::default();
        self.errors.clear_all();
        self.dropdowns.close_all();
        self.expansion = CategoryExpansion::default();
        self.attempted_submit = false;
        self.show_manual_entry = false;
    }

    // --- Display helpers ---

    /// Collapsed label of the services dropdown.
    pub fn services_summary(&self) -> String {
        match self.state.services.len() {
            0 => "Services Required".to_string(),
            1 => "1 service selected".to_string(),
            n => format!("{n} services selected"),
        }
    }

    /// Hint shown under the message once files are attached.
    pub fn attachment_hint(&self) -> Option<String> {
        let count = self.state.files.len();
        (count > 0).then(|| format!("{count} file(s) selected"))
    }
}
