//! Document model - the text buffer and file state of one tab

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;

use super::editor::{Position, Selection};
use crate::util::text::{char_type, word_count, CharType};

/// Name shown for documents that have never been saved
pub const UNTITLED_NAME: &str = "Untitled";

/// One undoable edit: `deleted_text` at `position` was replaced by `inserted_text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Char offset where the edit starts
    pub position: usize,
    pub deleted_text: String,
    pub inserted_text: String,
    pub selection_before: Selection,
    pub selection_after: Selection,
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Unsaved changes since the last load or save
    pub is_modified: bool,
    pub undo_stack: Vec<EditOperation>,
    pub redo_stack: Vec<EditOperation>,
    /// Incremented on every mutation; used to detect stale previews and saves
    pub revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            revision: 0,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut doc = Self::with_text(&content);
        doc.file_path = Some(path);
        Ok(doc)
    }

    /// An empty document bound to a path, filled in once loading completes
    pub fn pending_load(path: PathBuf) -> Self {
        let mut doc = Self::new();
        doc.file_path = Some(path);
        doc
    }

    /// File name of the backing path, or "Untitled"
    pub fn file_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED_NAME.to_string())
    }

    /// Tab header text: the file name with a trailing `*` while dirty
    pub fn display_name(&self) -> String {
        if self.is_modified {
            format!("{}*", self.file_name())
        } else {
            self.file_name()
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn word_count(&self) -> usize {
        match self.buffer.slice(..).as_str() {
            Some(contiguous) => word_count(contiguous),
            None => word_count(&self.text()),
        }
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Line content without its line ending
    pub fn line_text(&self, line_idx: usize) -> Option<Cow<'_, str>> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }
        let line = self.buffer.line(line_idx);
        let trimmed = line.slice(..self.line_length(line_idx));
        Some(match trimmed.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(trimmed.to_string()),
        })
    }

    /// Length of a line in chars, excluding the line ending
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(line_idx);
        let len = line.len_chars();
        if len == 0 {
            return 0;
        }
        match line.char(len - 1) {
            '\n' if len > 1 && line.char(len - 2) == '\r' => len - 2,
            '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => len - 1,
            _ => len,
        }
    }

    /// Char offset of the start of a line
    pub fn line_start(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        self.buffer.line_to_char(line_idx)
    }

    /// Convert a position to a char offset, clamping the column to the line
    pub fn offset_of(&self, pos: Position) -> usize {
        if pos.line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        self.buffer.line_to_char(pos.line) + pos.column.min(self.line_length(pos.line))
    }

    /// Convert a char offset to a position
    pub fn position_of(&self, offset: usize) -> Position {
        let clamped = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(clamped);
        let column = clamped - self.buffer.line_to_char(line);
        Position::new(line, column.min(self.line_length(line)))
    }

    /// Char range covered by a selection
    pub fn selection_range(&self, selection: &Selection) -> Range<usize> {
        self.offset_of(selection.start())..self.offset_of(selection.end())
    }

    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.buffer.len_chars());
        let start = range.start.min(end);
        self.buffer.slice(start..end).to_string()
    }

    /// Replace `range` with `text`, recording one undo step.
    ///
    /// Every buffer mutation from user input goes through here so that
    /// the dirty flag, revision and undo history stay consistent.
    pub fn replace_range(
        &mut self,
        range: Range<usize>,
        text: &str,
        selection_before: Selection,
        selection_after: Selection,
    ) {
        let end = range.end.min(self.buffer.len_chars());
        let start = range.start.min(end);
        if start == end && text.is_empty() {
            return;
        }

        let deleted_text = self.buffer.slice(start..end).to_string();
        self.buffer.remove(start..end);
        self.buffer.insert(start, text);

        self.undo_stack.push(EditOperation {
            position: start,
            deleted_text,
            inserted_text: text.to_string(),
            selection_before,
            selection_after,
        });
        self.redo_stack.clear();
        self.touch();
    }

    /// Apply a replacement and select `after` (anchor..head char offsets in
    /// the edited buffer). Returns `None` when there was nothing to change.
    pub fn apply_edit(
        &mut self,
        range: Range<usize>,
        text: &str,
        selection_before: Selection,
        after: Range<usize>,
    ) -> Option<Selection> {
        let end = range.end.min(self.buffer.len_chars());
        let start = range.start.min(end);
        if start == end && text.is_empty() {
            return None;
        }

        self.replace_range(start..end, text, selection_before, selection_before);
        let selection =
            Selection::from_anchor_head(self.position_of(after.start), self.position_of(after.end));
        if let Some(op) = self.undo_stack.last_mut() {
            op.selection_after = selection;
        }
        Some(selection)
    }

    /// Revert the last edit, returning the selection to restore
    pub fn undo(&mut self) -> Option<Selection> {
        let op = self.undo_stack.pop()?;
        let inserted_len = op.inserted_text.chars().count();
        self.buffer.remove(op.position..op.position + inserted_len);
        self.buffer.insert(op.position, &op.deleted_text);
        let selection = op.selection_before;
        self.redo_stack.push(op);
        self.touch();
        Some(selection)
    }

    /// Re-apply the last undone edit, returning the selection to restore
    pub fn redo(&mut self) -> Option<Selection> {
        let op = self.redo_stack.pop()?;
        let deleted_len = op.deleted_text.chars().count();
        self.buffer.remove(op.position..op.position + deleted_len);
        self.buffer.insert(op.position, &op.inserted_text);
        let selection = op.selection_after;
        self.undo_stack.push(op);
        self.touch();
        Some(selection)
    }

    /// Replace the whole buffer with freshly loaded file contents
    pub fn set_text_from_load(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.revision = self.revision.wrapping_add(1);
        self.is_modified = false;
    }

    /// Record a completed save of the content captured at `saved_revision`.
    ///
    /// Edits made while the write was in flight keep the document dirty.
    pub fn mark_saved(&mut self, path: PathBuf, saved_revision: u64) {
        self.file_path = Some(path);
        if self.revision == saved_revision {
            self.is_modified = false;
        }
    }

    /// Offset of the word start at or before `offset`, skipping whitespace first
    pub fn prev_word_boundary(&self, offset: usize) -> usize {
        let mut pos = offset.min(self.buffer.len_chars());
        while pos > 0 && char_type(self.buffer.char(pos - 1)) == CharType::Whitespace {
            pos -= 1;
        }
        if pos == 0 {
            return 0;
        }
        let kind = char_type(self.buffer.char(pos - 1));
        while pos > 0 && char_type(self.buffer.char(pos - 1)) == kind {
            pos -= 1;
        }
        pos
    }

    /// Offset just past the word at or after `offset`, skipping whitespace first
    pub fn next_word_boundary(&self, offset: usize) -> usize {
        let len = self.buffer.len_chars();
        let mut pos = offset.min(len);
        while pos < len && char_type(self.buffer.char(pos)) == CharType::Whitespace {
            pos += 1;
        }
        if pos == len {
            return len;
        }
        let kind = char_type(self.buffer.char(pos));
        while pos < len && char_type(self.buffer.char(pos)) == kind {
            pos += 1;
        }
        pos
    }

    /// Run of same-class characters around `offset`, used by double-click
    pub fn word_range_at(&self, offset: usize) -> Range<usize> {
        let len = self.buffer.len_chars();
        let offset = offset.min(len);
        // prefer the character under the caret, else the one before it
        let probe = if offset < len && self.buffer.char(offset) != '\n' {
            offset
        } else if offset > 0 {
            offset - 1
        } else {
            return offset..offset;
        };
        let kind = char_type(self.buffer.char(probe));
        if self.buffer.char(probe) == '\n' {
            return offset..offset;
        }

        let mut start = probe;
        while start > 0 {
            let ch = self.buffer.char(start - 1);
            if ch == '\n' || char_type(ch) != kind {
                break;
            }
            start -= 1;
        }
        let mut end = probe + 1;
        while end < len {
            let ch = self.buffer.char(end);
            if ch == '\n' || char_type(ch) != kind {
                break;
            }
            end += 1;
        }
        start..end
    }

    fn touch(&mut self) {
        self.is_modified = true;
        self.revision = self.revision.wrapping_add(1);
    }
}
