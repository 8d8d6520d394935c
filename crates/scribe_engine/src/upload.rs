use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use scribe_logging::{scribe_debug, scribe_info, Redacted};

use crate::ack::UploadAck;
use crate::credentials::CsrfTokenProvider;
use crate::{FailureKind, StoredImage, UploadError};

pub const UPLOAD_ENDPOINT: &str = "/storage/upload/";
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Origin the page was served from; the endpoint is resolved against it.
    pub base_url: String,
    pub endpoint: String,
    /// Raw `Cookie` header sent with each request (same-origin credentials).
    pub cookie: Option<String>,
    /// No deadline is applied unless set.
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint: UPLOAD_ENDPOINT.to_string(),
            cookie: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Stores one file under `dest_path` and returns where it ended up.
    async fn upload(
        &self,
        file: &Path,
        file_name: &str,
        dest_path: &str,
    ) -> Result<StoredImage, UploadError>;
}

pub struct ReqwestUploader {
    settings: UploadSettings,
    client: reqwest::Client,
    csrf: Arc<dyn CsrfTokenProvider>,
}

impl ReqwestUploader {
    pub fn new(
        settings: UploadSettings,
        csrf: Arc<dyn CsrfTokenProvider>,
    ) -> Result<Self, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            csrf,
        })
    }

    fn endpoint_url(&self) -> Result<reqwest::Url, UploadError> {
        reqwest::Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(&self.settings.endpoint))
            .map_err(|err| UploadError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        file: &Path,
        file_name: &str,
        dest_path: &str,
    ) -> Result<StoredImage, UploadError> {
        let url = self.endpoint_url()?;
        let bytes = tokio::fs::read(file).await.map_err(|err| {
            UploadError::new(
                FailureKind::Io,
                format!("cannot read {}: {err}", file.display()),
            )
        })?;
        let byte_len = bytes.len();

        let mime = mime_guess::from_path(file).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime.as_ref())
            .map_err(map_reqwest_error)?;
        let form = Form::new()
            .part("file", part)
            .text("path", dest_path.to_string());

        let token = self.csrf.csrf_token().unwrap_or_default();
        scribe_debug!(
            "POST {} file={} bytes={} path={} csrf={}",
            url,
            file_name,
            byte_len,
            dest_path,
            Redacted(&token)
        );

        let mut request = self
            .client
            .post(url)
            .header(CSRF_HEADER, token)
            .header(REQUESTED_WITH_HEADER, "XMLHttpRequest")
            .multipart(form);
        if let Some(cookie) = self.settings.cookie.as_deref() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        // The body is decoded before the status is judged, so an error page
        // that is not JSON surfaces as a malformed response.
        let ack = UploadAck::parse(&body)?;
        if !status.is_success() {
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                ack.failure_message(),
            ));
        }
        if !ack.is_success() {
            return Err(UploadError::new(
                FailureKind::Rejected,
                ack.failure_message(),
            ));
        }

        let image = ack.into_stored_image()?;
        scribe_info!("Stored {} as {}/{}", file_name, image.domain, image.name);
        Ok(image)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
