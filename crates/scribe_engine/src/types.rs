use std::fmt;
use std::path::PathBuf;

pub type BatchId = u64;
pub type ExportId = u64;

/// Public location of an object the storage service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub domain: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        batch: BatchId,
        index: usize,
        result: Result<StoredImage, UploadError>,
    },
    ExportCompleted {
        export_id: ExportId,
        result: Result<PathBuf, ExportError>,
    },
    TipElapsed {
        batch: BatchId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected file could not be read.
    Io,
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    /// Storage answered with a non-success state.
    Rejected,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Io => write!(f, "file read error"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by storage"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("could not start renderer {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("render failed: {0}")]
    Render(String),
    #[error("could not save pdf: {0}")]
    Persist(String),
}

impl From<crate::persist::PersistError> for ExportError {
    fn from(err: crate::persist::PersistError) -> Self {
        ExportError::Persist(err.to_string())
    }
}
