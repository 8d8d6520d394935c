use std::fmt;
use std::path::PathBuf;

use crate::editor::EditorBuffer;
use crate::view_model::PageViewModel;

pub type BatchId = u64;
pub type ExportId = u64;

/// A file chosen in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Names the file after the last component of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        Self { name, path }
    }
}

/// Where storage put an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub domain: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipStatus {
    Uploading { current: usize, total: usize },
    Succeeded { uploaded: usize, total: usize },
}

impl fmt::Display for TipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipStatus::Uploading { current, total } => write!(f, "uploading {current}/{total}"),
            TipStatus::Succeeded { uploaded, total } => {
                write!(f, "succeeded {uploaded}/{total}")
            }
        }
    }
}

/// Transient on-screen indicator owned by one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTip {
    pub batch: BatchId,
    pub status: TipStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UploadBatch {
    pub(crate) id: BatchId,
    pub(crate) files: Vec<SelectedFile>,
    pub(crate) dest_path: String,
    pub(crate) uploaded: usize,
}

impl UploadBatch {
    pub(crate) fn total(&self) -> usize {
        self.files.len()
    }

    /// Next file to send, if any remain.
    pub(crate) fn pending(&self) -> Option<&SelectedFile> {
        self.files.get(self.uploaded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    editor: EditorBuffer,
    file_input: Vec<SelectedFile>,
    batch: Option<UploadBatch>,
    tip: Option<ProgressTip>,
    exports_in_flight: usize,
    last_batch_id: BatchId,
    last_export_id: ExportId,
    dirty: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_editor(editor: EditorBuffer) -> Self {
        Self {
            editor,
            ..Self::default()
        }
    }

    pub fn view(&self) -> PageViewModel {
        PageViewModel {
            editor_text: self.editor.text().to_string(),
            selection: self.editor.selection(),
            tip: self.tip.map(|tip| tip.status.to_string()),
            file_input: self.file_input.iter().map(|f| f.name.clone()).collect(),
            uploading: self.batch.is_some(),
            exports_in_flight: self.exports_in_flight,
            dirty: self.dirty,
        }
    }

    pub fn editor(&self) -> &EditorBuffer {
        &self.editor
    }

    pub fn file_input(&self) -> &[SelectedFile] {
        &self.file_input
    }

    pub fn tip(&self) -> Option<ProgressTip> {
        self.tip
    }

    /// True when nothing is in flight and no tip is waiting to be dismissed.
    pub fn is_idle(&self) -> bool {
        self.batch.is_none() && self.tip.is_none() && self.exports_in_flight == 0
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn editor_mut(&mut self) -> &mut EditorBuffer {
        &mut self.editor
    }

    pub(crate) fn batch(&self) -> Option<&UploadBatch> {
        self.batch.as_ref()
    }

    pub(crate) fn batch_mut(&mut self) -> Option<&mut UploadBatch> {
        self.batch.as_mut()
    }

    pub(crate) fn start_batch(&mut self, files: Vec<SelectedFile>, dest_path: String) -> BatchId {
        self.last_batch_id += 1;
        let id = self.last_batch_id;
        self.file_input = files.clone();
        self.batch = Some(UploadBatch {
            id,
            files,
            dest_path,
            uploaded: 0,
        });
        self.mark_dirty();
        id
    }

    /// Ends the current batch and clears the file input.
    pub(crate) fn end_batch(&mut self) -> Option<UploadBatch> {
        self.file_input.clear();
        self.mark_dirty();
        self.batch.take()
    }

    pub(crate) fn set_tip(&mut self, tip: Option<ProgressTip>) {
        self.tip = tip;
        self.mark_dirty();
    }

    pub(crate) fn begin_export(&mut self) -> ExportId {
        self.last_export_id += 1;
        self.exports_in_flight += 1;
        self.mark_dirty();
        self.last_export_id
    }

    pub(crate) fn finish_export(&mut self) {
        self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
        self.mark_dirty();
    }
}
