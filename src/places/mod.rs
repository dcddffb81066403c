//! Address autocomplete for the booking form.
//!
//! [`ScriptLoader`] publishes whether the lookup service is usable;
//! [`AddressAutocomplete`] binds a [`PlacesWidget`] to the address field once
//! it is, and drops the binding while manual entry is on. [`PlacesClient`]
//! talks to Google Places and [`SuggestionPanel`] is the terminal widget that
//! shows its suggestions.

mod autocomplete;
mod client;
mod error;
mod loader;
mod panel;

pub use autocomplete::{AddressAutocomplete, BindingId, PlaceSelected, PlacesWidget};
pub use client::{Place, PlaceLookup, PlacesClient};
pub use error::PlacesError;
pub use loader::{ScriptLoader, ScriptReady, ScriptStatus};
pub use panel::SuggestionPanel;
