use std::io;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use futures::{FutureExt, SinkExt, TryStreamExt};
use tokio::fs::{self, OpenOptions};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::info;

use super::BookingSink;
use super::codec::JsonLinesCodec;
use super::error::SubmitError;
use crate::model::BookingRequest;

/// Local JSONL queue of bookings, used when no intake endpoint is configured.
///
/// Each accepted booking is appended as one line to `outbox.jsonl`.
#[derive(Debug, Clone)]
pub struct Outbox {
    path: PathBuf,
}

impl Outbox {
    /// An outbox at `<data_dir>/outbox.jsonl`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::at(data_dir.join("outbox.jsonl"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one booking, creating the file and its directory if needed.
    pub async fn append(&self, request: BookingRequest) -> Result<(), SubmitError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let mut framed = FramedWrite::new(file, JsonLinesCodec::<BookingRequest>::new());
        framed.send(request).await?;
        framed.close().await?;
        info!(path = %self.path.display(), "booking queued in outbox");
        Ok(())
    }

    /// Reads every queued booking in order. A missing outbox is empty.
    pub async fn read_all(&self) -> Result<Vec<BookingRequest>, SubmitError> {
        let file = match fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        FramedRead::new(file, JsonLinesCodec::<BookingRequest>::new())
            .try_collect()
            .await
    }
}

impl BookingSink for Outbox {
    fn submit(&self, request: BookingRequest) -> BoxFuture<'static, Result<(), SubmitError>> {
        let outbox = self.clone();
        async move { outbox.append(request).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::BookingFormState;

    fn request(name: &str) -> BookingRequest {
        let state = BookingFormState {
            name: name.into(),
            email: "jo@example.com".into(),
            phone: "0412345678".into(),
            address: "1 George St".into(),
            terms_accepted: true,
            ..BookingFormState::default()
        };
        BookingRequest::from_state(&state, Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn missing_outbox_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::in_dir(dir.path());
        assert!(outbox.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appends_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::in_dir(dir.path());
        outbox.append(request("First")).await.unwrap();
        outbox.append(request("Second")).await.unwrap();

        let queued = outbox.read_all().await.unwrap();
        let names: Vec<_> = queued.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(queued[0], request("First"));
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::at(dir.path().join("nested").join("outbox.jsonl"));
        outbox.submit(request("Jo")).await.unwrap();
        assert_eq!(outbox.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn one_line_per_booking() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::in_dir(dir.path());
        outbox.append(request("A")).await.unwrap();
        outbox.append(request("B")).await.unwrap();
        let raw = std::fs::read_to_string(outbox.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.lines().all(|l| l.starts_with("{\"name\":")));
    }

    #[tokio::test]
    async fn corrupt_line_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::in_dir(dir.path());
        std::fs::write(outbox.path(), "{oops\n").unwrap();
        assert!(matches!(
            outbox.read_all().await,
            Err(SubmitError::Json(_))
        ));
    }
}
