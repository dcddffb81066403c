use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::field::Field;
use super::service::ServiceItem;

/// Why a single form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("{}", .0.invalid_format_message())]
    InvalidFormat(Field),
    #[error("Please select at least one service")]
    EmptySelection,
    #[error("You must accept the terms and conditions")]
    NotAccepted,
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid hardcoded regex")
});

// Mobile or landline, `+61` or leading `0`, optional space/dash separators.
static AU_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+61|0)[2-478](?:[ -]?\d{4}[ -]?\d{4}|\d{8})$").expect("valid hardcoded regex")
});

/// Fails with [`FieldError::Required`] when the trimmed value is empty.
pub fn validate_required(field: Field, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(())
    }
}

/// Validates an email address of the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    validate_required(Field::Email, email)?;
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(FieldError::InvalidFormat(Field::Email))
    }
}

/// Validates an Australian phone number (e.g., `0412345678`, `+61 2 9876 5432`).
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    validate_required(Field::Phone, phone)?;
    if AU_PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(FieldError::InvalidFormat(Field::Phone))
    }
}

/// Runs the blur-time check for a text field.
///
/// Fields without a text rule (selections, checkboxes, manual entry) always pass.
pub fn validate_text_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
        Field::Name | Field::Address | Field::Message => validate_required(field, value),
        _ => Ok(()),
    }
}

pub fn validate_services(services: &BTreeSet<ServiceItem>) -> Result<(), FieldError> {
    if services.is_empty() {
        Err(FieldError::EmptySelection)
    } else {
        Ok(())
    }
}

pub fn validate_terms(accepted: bool) -> Result<(), FieldError> {
    if accepted {
        Ok(())
    } else {
        Err(FieldError::NotAccepted)
    }
}
