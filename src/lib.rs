#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! leadbook: a terminal booking form for home-trade services.
//!
//! - [`model`]: service vocabulary, preferred time/urgency/date options,
//!   field validators and the outbound [`model::BookingRequest`].
//! - [`form`]: [`form::BookingFormController`], which owns the form state,
//!   validation errors, dropdowns and the submission lifecycle.
//! - [`submit`]: where bookings go, over HTTP or into a local outbox.
//! - [`places`]: address autocomplete via Google Places.
//! - [`config`] and [`logging`]: runtime settings and tracing setup.
//! - [`tui`]: the ratatui front end.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod places;
pub mod submit;
pub mod tui;
