use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::options::{PreferredDate, PreferredTime, Urgency};
use super::service::ServiceItem;

/// A file the customer attached to the booking.
///
/// Treated as an opaque handle: nothing is read until the booking is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: PathBuf,
}

impl Attachment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Final path component, used as the upload file name.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Everything the customer has entered into the booking form.
///
/// Created empty when the form mounts and replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingFormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Address typed by hand; autocomplete is switched off while set.
    pub manual_entry: bool,
    pub services: BTreeSet<ServiceItem>,
    pub preferred_time: Option<PreferredTime>,
    pub urgency: Option<Urgency>,
    pub preferred_date: PreferredDate,
    pub message: String,
    pub files: Vec<Attachment>,
    pub newsletter: bool,
    pub terms_accepted: bool,
}

impl BookingFormState {
    /// Returns the value of a free-text field, or `None` for non-text fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Address => Some(&self.address),
            Field::Message => Some(&self.message),
            _ => None,
        }
    }

    /// Mutable access to a free-text field, or `None` for non-text fields.
    pub(crate) fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Address => Some(&mut self.address),
            Field::Message => Some(&mut self.message),
            _ => None,
        }
    }

    /// Returns `true` if nothing has been entered.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
