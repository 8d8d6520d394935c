use std::ops::Range;

/// Text of the editor field plus its selection, in byte offsets.
///
/// The selection is always ordered, inside the text, and on char boundaries.
/// A collapsed selection (`start == end`) is the caret.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorBuffer {
    text: String,
    selection: Range<usize>,
}

impl EditorBuffer {
    /// Buffer holding `text` with the caret placed after the last character.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn caret(&self) -> usize {
        self.selection.end
    }

    /// Moves the selection; out of range offsets are clamped and mid-char
    /// offsets snap back to the previous boundary.
    pub fn select(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let start = floor_boundary(&self.text, start);
        let end = floor_boundary(&self.text, end);
        self.selection = start..end;
    }

    /// Replaces the selected text with `snippet` and collapses the caret right
    /// after it, so the next insertion lands behind this one.
    pub fn insert_at_caret(&mut self, snippet: &str) -> usize {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, snippet);
        let caret = start + snippet.len();
        self.selection = caret..caret;
        caret
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
