use std::time::Duration;

use chrono::NaiveDate;

use crate::{BatchId, ExportId, SelectedFile};

/// How long the final "succeeded" tip stays on screen.
pub const TIP_LINGER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the report region and save it as `report_<date>.pdf`.
    ExportPdf { export_id: ExportId, date: NaiveDate },
    OpenFilePicker,
    /// Send one file of a batch; the next is only requested after this one resolves.
    UploadFile {
        batch: BatchId,
        index: usize,
        file: SelectedFile,
        dest_path: String,
    },
    /// Blocking, user-visible notification.
    ShowAlert(String),
    /// Clear the file input so the same files can be picked again.
    ResetFileInput,
    ScheduleTipDismiss { batch: BatchId, after: Duration },
}
