use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use super::BookingSink;
use super::error::SubmitError;
use crate::form::{Submission, SubmissionTicket};

/// A submission running on the async runtime.
///
/// The UI thread polls it with [`try_take`](Self::try_take) each tick.
/// Dropping it aborts the task, so tearing down the form cancels any request
/// still in flight.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: SubmissionTicket,
    rx: oneshot::Receiver<Result<(), SubmitError>>,
    task: JoinHandle<()>,
}

impl PendingSubmission {
    /// Starts sending `submission` through `sink` on `handle`.
    pub fn spawn(handle: &Handle, sink: Arc<dyn BookingSink>, submission: Submission) -> Self {
        let Submission { ticket, request } = submission;
        let (tx, rx) = oneshot::channel();
        let send = sink.submit(request);
        let task = handle.spawn(async move {
            // The receiver is gone only if the form was torn down.
            let _ = tx.send(send.await);
        });
        Self { ticket, rx, task }
    }

    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    /// Returns the outcome if the task has finished, without blocking.
    ///
    /// A task that ended without reporting yields [`SubmitError::Cancelled`].
    /// Call at most once after it returns `Some`.
    pub fn try_take(&mut self) -> Option<Result<(), SubmitError>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(SubmitError::Cancelled)),
        }
    }

    /// Waits for the outcome.
    pub async fn wait(&mut self) -> Result<(), SubmitError> {
        (&mut self.rx).await.unwrap_or(Err(SubmitError::Cancelled))
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        self.task.abort();
    }
}
