use std::collections::BTreeMap;

use crate::model::{Field, FieldError};

/// Per-field validation errors currently recorded against the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` against `field`, replacing any earlier error.
    pub fn set(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Records the error from a failed check. Passing checks leave the
    /// field's existing entry untouched. Returns `true` if the check passed.
    pub fn record(&mut self, field: Field, result: Result<(), FieldError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.set(field, error);
                false
            }
        }
    }

    /// Removes the error for `field`. Returns `true` if there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// The display message for `field`, if it has an error.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut errors = ValidationErrors::new();
        errors.set(Field::Name, FieldError::Required(Field::Name));
        assert_eq!(errors.get(Field::Name), Some(FieldError::Required(Field::Name)));
        assert_eq!(errors.message(Field::Name).as_deref(), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn record_only_stores_failures() {
        let mut errors = ValidationErrors::new();
        errors.set(Field::Email, FieldError::InvalidFormat(Field::Email));
        assert!(errors.record(Field::Email, Ok(())));
        assert!(errors.contains(Field::Email));
        assert!(!errors.record(Field::Phone, Err(FieldError::Required(Field::Phone))));
        assert!(errors.contains(Field::Phone));
    }

    #[test]
    fn clear_reports_whether_removed() {
        let mut errors = ValidationErrors::new();
        errors.set(Field::Name, FieldError::Required(Field::Name));
        assert!(errors.clear(Field::Name));
        assert!(!errors.clear(Field::Name));
        assert!(errors.is_empty());
    }

    #[test]
    fn fields_iterate_in_form_order() {
        let mut errors = ValidationErrors::new();
        errors.set(Field::TermsAccepted, FieldError::NotAccepted);
        errors.set(Field::Address, FieldError::Required(Field::Address));
        errors.set(Field::Name, FieldError::Required(Field::Name));
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Name, Field::Address, Field::TermsAccepted]);
    }
}
