//! Acknowledgement body returned by the storage upload endpoint.
//!
//! ```json
//! { "state": 1, "data": { "cloudflare": { "domain": "https://cdn" }, "lPage": [{ "name": "a.png" }] } }
//! { "state": 0, "message": "quota exceeded" }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, StoredImage, UploadError};

const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadAck {
    /// Success sentinel is the number `1`; anything else is a rejection.
    #[serde(default)]
    pub state: Value,
    /// Usually a string, but any truthy JSON value is shown.
    #[serde(default)]
    pub message: Value,
    /// Only decoded into [`AckData`] once the acknowledgement is a success.
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AckData {
    pub cloudflare: CdnInfo,
    #[serde(rename = "lPage")]
    pub objects: Vec<StoredObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CdnInfo {
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredObject {
    pub name: String,
}

impl UploadAck {
    pub fn parse(body: &str) -> Result<Self, UploadError> {
        serde_json::from_str(body).map_err(|err| {
            UploadError::new(
                FailureKind::MalformedResponse,
                format!("malformed upload response: {err}"),
            )
        })
    }

    pub fn is_success(&self) -> bool {
        self.state.as_f64() == Some(1.0)
    }

    /// `upload failed: <server message>`, falling back when the server sent none.
    pub fn failure_message(&self) -> String {
        let detail = match &self.message {
            Value::String(text) if !text.is_empty() => text.clone(),
            Value::Bool(true) => "true".to_string(),
            Value::Number(number) if number.as_f64() != Some(0.0) => number.to_string(),
            value @ (Value::Array(_) | Value::Object(_)) => value.to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        };
        format!("upload failed: {detail}")
    }

    /// Location of the first stored object.
    pub fn into_stored_image(self) -> Result<StoredImage, UploadError> {
        let malformed = |detail: String| {
            UploadError::new(
                FailureKind::MalformedResponse,
                format!("malformed upload response: {detail}"),
            )
        };
        let data = self
            .data
            .ok_or_else(|| malformed("missing data".to_string()))?;
        let data: AckData =
            serde_json::from_value(data).map_err(|err| malformed(err.to_string()))?;
        let first = data
            .objects
            .into_iter()
            .next()
            .ok_or_else(|| malformed("no stored objects".to_string()))?;
        Ok(StoredImage {
            domain: data.cloudflare.domain,
            name: first.name,
        })
    }
}
