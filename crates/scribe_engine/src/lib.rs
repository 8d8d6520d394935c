//! Scribe engine: upload client, PDF export and effect execution.
mod ack;
mod credentials;
mod engine;
mod export;
mod persist;
mod render;
mod types;
mod upload;

pub use ack::{AckData, CdnInfo, StoredObject, UploadAck};
pub use credentials::{CookieCsrfProvider, CsrfTokenProvider, StaticCsrfToken};
pub use engine::EngineHandle;
pub use export::{
    report_filename, CaptureOptions, ExportConfig, Exporter, ImageFormat, ImageOptions,
    Orientation, PageBreakMode, PageBreakOptions, PageOptions, PaperSize, PdfRenderer, Unit,
    CAPTURE_SCALE, JPEG_QUALITY, MARGIN_MM,
};
pub use persist::{ensure_downloads_dir, AtomicFileWriter, PersistError};
pub use render::CommandPdfRenderer;
pub use types::{
    BatchId, EngineEvent, ExportError, ExportId, FailureKind, StoredImage, UploadError,
};
pub use upload::{
    ReqwestUploader, UploadSettings, Uploader, CSRF_HEADER, REQUESTED_WITH_HEADER,
    UPLOAD_ENDPOINT,
};
