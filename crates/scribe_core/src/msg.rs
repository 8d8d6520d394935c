use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{BatchId, ExportId, SelectedFile, UploadedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked the download button.
    DownloadClicked { today: NaiveDate },
    /// Renderer finished; `Ok` carries the saved file, `Err` the diagnostic.
    ExportFinished {
        export_id: ExportId,
        result: Result<PathBuf, String>,
    },
    /// User clicked the upload image button.
    UploadImageClicked,
    /// File picker closed with this selection.
    FilesSelected { files: Vec<SelectedFile>, year: i32 },
    /// Storage acknowledged one file of a batch.
    FileUploaded {
        batch: BatchId,
        index: usize,
        image: UploadedImage,
    },
    /// One file of a batch failed; the rest of the batch is abandoned.
    UploadFailed {
        batch: BatchId,
        index: usize,
        reason: String,
    },
    /// The linger timer of a finished batch ran out.
    TipExpired { batch: BatchId },
    /// User moved the caret or changed the selection in the editor.
    SelectionChanged { start: usize, end: usize },
}
