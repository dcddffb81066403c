//! Handing validated bookings to the intake service.
//!
//! A [`BookingSink`] is anything that accepts a [`BookingRequest`]: the HTTP
//! intake endpoint, or the local JSONL outbox when no endpoint is configured.
//! Submissions run on the async runtime via [`PendingSubmission`] so the UI
//! thread never blocks on the network.

mod codec;
mod error;
mod http;
mod outbox;
mod pending;

use futures::future::BoxFuture;

use crate::model::BookingRequest;

pub use codec::JsonLinesCodec;
pub use error::{SUBMISSION_FAILED_MESSAGE, SubmitError};
pub use http::HttpSink;
pub use outbox::Outbox;
pub use pending::PendingSubmission;

/// Destination for submitted bookings.
pub trait BookingSink: Send + Sync {
    /// Sends one booking. The returned future owns everything it needs so it
    /// can be spawned.
    fn submit(&self, request: BookingRequest) -> BoxFuture<'static, Result<(), SubmitError>>;
}
