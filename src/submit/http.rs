use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::BookingSink;
use super::error::SubmitError;
use crate::model::BookingRequest;

/// Posts bookings to the intake endpoint as `multipart/form-data`.
///
/// Scalar fields go as text parts, each selected service as a repeated
/// `services` part, and each attachment as a `files` part carrying its file
/// name.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    /// Creates a sink for `endpoint`; every request is abandoned after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmitError::Network)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        client: reqwest::Client,
        endpoint: String,
        request: BookingRequest,
    ) -> Result<(), SubmitError> {
        let form = build_form(&request).await?;
        debug!(%endpoint, "posting booking");
        let response = client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(SubmitError::Network)?;
        classify(response.status())?;
        info!(status = response.status().as_u16(), "intake service accepted booking");
        Ok(())
    }
}

impl BookingSink for HttpSink {
    fn submit(&self, request: BookingRequest) -> BoxFuture<'static, Result<(), SubmitError>> {
        Self::send(self.client.clone(), self.endpoint.clone(), request).boxed()
    }
}

/// Builds the multipart body. Attachments are read from disk here, so a
/// missing file fails the submission before anything is sent.
pub(crate) async fn build_form(request: &BookingRequest) -> Result<Form, SubmitError> {
    let mut form = Form::new();
    for (name, value) in request.text_fields() {
        form = form.text(name, value);
    }
    for service in &request.services {
        form = form.text("services", service.clone());
    }
    for attachment in &request.files {
        let bytes = tokio::fs::read(attachment.path()).await?;
        let part = Part::bytes(bytes).file_name(attachment.file_name());
        form = form.part("files", part);
    }
    Ok(form)
}

/// Maps a response status onto success or the matching failure kind.
pub(crate) fn classify(status: StatusCode) -> Result<(), SubmitError> {
    if status.is_success() {
        Ok(())
    } else if status.is_client_error() {
        Err(SubmitError::Rejected {
            status: status.as_u16(),
        })
    } else {
        Err(SubmitError::Server {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{Attachment, BookingFormState};

    fn request_with_files(files: Vec<Attachment>) -> BookingRequest {
        let state = BookingFormState {
            name: "Jo".into(),
            files,
            ..BookingFormState::default()
        };
        BookingRequest::from_state(&state, Utc::now())
    }

    mod classify {
        use super::*;

        #[test]
        fn success_codes_pass() {
            assert!(classify(StatusCode::OK).is_ok());
            assert!(classify(StatusCode::CREATED).is_ok());
            assert!(classify(StatusCode::NO_CONTENT).is_ok());
        }

        #[test]
        fn client_errors_are_rejections() {
            assert!(matches!(
                classify(StatusCode::UNPROCESSABLE_ENTITY),
                Err(SubmitError::Rejected { status: 422 })
            ));
            assert!(matches!(
                classify(StatusCode::BAD_REQUEST),
                Err(SubmitError::Rejected { status: 400 })
            ));
        }

        #[test]
        fn server_errors_are_server_failures() {
            assert!(matches!(
                classify(StatusCode::INTERNAL_SERVER_ERROR),
                Err(SubmitError::Server { status: 500 })
            ));
            assert!(matches!(
                classify(StatusCode::SERVICE_UNAVAILABLE),
                Err(SubmitError::Server { status: 503 })
            ));
        }

        #[test]
        fn redirects_not_followed_count_as_failures() {
            assert!(classify(StatusCode::NOT_MODIFIED).is_err());
        }
    }

    mod form {
        use super::*;

        #[tokio::test]
        async fn missing_attachment_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let missing = dir.path().join("nope.jpg");
            let req = request_with_files(vec![Attachment::new(missing)]);
            assert!(matches!(build_form(&req).await, Err(SubmitError::Io(_))));
        }

        #[tokio::test]
        async fn readable_attachment_builds() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("leak.jpg");
            std::fs::write(&path, b"jpeg").unwrap();
            let req = request_with_files(vec![Attachment::new(path)]);
            assert!(build_form(&req).await.is_ok());
        }

        #[tokio::test]
        async fn unreachable_endpoint_is_network_error() {
            let sink = HttpSink::new("http://127.0.0.1:9/bookings", Duration::from_secs(2)).unwrap();
            let result = sink.submit(request_with_files(Vec::new())).await;
            assert!(matches!(result, Err(SubmitError::Network(_))));
        }
    }
}
