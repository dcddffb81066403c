//! TUI screen implementations.

pub mod booking;
pub mod help;
pub mod thank_you;

pub use booking::{BookingLayout, BookingState, Focus, draw_booking};
pub use help::{HelpState, draw_help};
pub use thank_you::{ThankYouState, draw_thank_you};
