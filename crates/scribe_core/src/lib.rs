//! Scribe core: pure page state machine and view-model helpers.
mod editor;
mod effect;
mod markdown;
mod msg;
mod state;
mod update;
mod view_model;

pub use editor::EditorBuffer;
pub use effect::{Effect, TIP_LINGER};
pub use markdown::{image_snippet, image_url, upload_destination};
pub use msg::Msg;
pub use state::{
    BatchId, ExportId, PageState, ProgressTip, SelectedFile, TipStatus, UploadedImage,
};
pub use update::{update, upload_failed_alert, EXPORT_FAILED_ALERT};
pub use view_model::PageViewModel;
