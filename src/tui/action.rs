//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::form::Submission;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// Screens change their own state directly; the `App` handles anything that
/// needs the runtime, the booking sink or the address autocomplete.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Send a validated booking.
    Submit(Submission),
    /// The address text changed; refresh suggestions.
    AddressEdited(String),
    /// The manual-entry toggle changed.
    ManualEntry(bool),
    /// Leave the thank-you view for a fresh form.
    BookAnother,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
