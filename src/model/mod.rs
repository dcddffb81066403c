mod booking;
mod field;
mod options;
mod request;
mod service;
mod validation;

pub use booking::{Attachment, BookingFormState};
pub use field::{Field, REQUIRED_TEXT_FIELDS};
pub use options::{DateRange, PreferredDate, PreferredTime, Urgency};
pub use request::BookingRequest;
pub use service::{Service, ServiceCategory, ServiceItem};
pub use validation::{
    FieldError, validate_email, validate_phone, validate_required, validate_services,
    validate_terms, validate_text_field,
};
