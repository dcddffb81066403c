use std::fmt;

use serde::{Deserialize, Serialize};

/// Every user-editable field of the booking form.
///
/// Used as the key of the validation error map, so the ordering here is the
/// order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
    ManualEntry,
    Services,
    PreferredTime,
    Urgency,
    PreferredDate,
    Message,
    Files,
    Newsletter,
    TermsAccepted,
}

/// Text fields that must be filled in before a booking can be sent, in
/// validation order.
pub const REQUIRED_TEXT_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Phone,
    Field::Email,
    Field::Address,
    Field::Message,
];

impl Field {
    /// Human-readable label, used in error messages and field titles.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Email",
            Field::Address => "Address",
            Field::ManualEntry => "Manual Entry",
            Field::Services => "Services",
            Field::PreferredTime => "Preferred Time",
            Field::Urgency => "Urgency",
            Field::PreferredDate => "Preferred Date",
            Field::Message => "Message",
            Field::Files => "Files",
            Field::Newsletter => "Newsletter",
            Field::TermsAccepted => "Terms",
        }
    }

    /// Message shown when the field holds a value of the wrong shape.
    pub fn invalid_format_message(self) -> String {
        match self {
            Field::Email => "Please enter a valid email address".to_string(),
            Field::Phone => "Please enter a valid Australian phone number".to_string(),
            other => format!("{} is invalid", other.label()),
        }
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
