use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageViewModel {
    pub editor_text: String,
    pub selection: Range<usize>,
    /// Text of the progress indicator, when one is shown.
    pub tip: Option<String>,
    /// Names currently held by the file input.
    pub file_input: Vec<String>,
    pub uploading: bool,
    pub exports_in_flight: usize,
    pub dirty: bool,
}
