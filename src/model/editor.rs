//! Editor state - cursor, selection and viewport of one tab

use super::document::Document;
use crate::scroll_sync::ScrollMetrics;

/// Lines kept between the cursor and the viewport edge when revealing it
const SCROLL_PADDING: usize = 1;
const HORIZONTAL_MARGIN: usize = 4;

/// A position in the document (line and column, 0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A text selection with anchor (start) and head (cursor end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
}

impl Selection {
    /// Create a new empty selection at a position
    pub fn new(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn from_anchor_head(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The smaller of anchor and head
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The larger of anchor and head
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// The same head with the anchor moved onto it
    pub fn collapsed(&self) -> Self {
        Self::new(self.head)
    }
}

/// Cursor position in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
    /// Column to aim for when moving vertically through shorter lines
    pub desired_column: Option<usize>,
}

impl Cursor {
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            desired_column: None,
        }
    }

    pub fn to_position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Viewport state - what portion of the document is visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// First visible column (for horizontal scrolling)
    pub left_column: usize,
    pub visible_lines: usize,
    pub visible_columns: usize,
}

impl Viewport {
    pub fn new(visible_lines: usize, visible_columns: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            visible_lines,
            visible_columns,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(25, 80)
    }
}

/// Cursor motions shared by plain and selection-extending movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

/// Per-tab view state: a single cursor with its selection and viewport
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub cursor: Cursor,
    /// Selection head always equals the cursor position
    pub selection: Selection,
    pub viewport: Viewport,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(visible_lines: usize, visible_columns: usize) -> Self {
        Self {
            viewport: Viewport::new(visible_lines, visible_columns),
            ..Self::default()
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Move the cursor, dropping any selection
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = Cursor::at(pos.line, pos.column);
        self.selection = Selection::new(pos);
    }

    /// Move the cursor while keeping the selection anchor
    pub fn extend_to(&mut self, pos: Position) {
        self.cursor = Cursor::at(pos.line, pos.column);
        self.selection.head = pos;
    }

    /// Apply a selection, placing the cursor on its head
    pub fn set_selection(&mut self, selection: Selection) {
        self.cursor = Cursor::at(selection.head.line, selection.head.column);
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = self.selection.collapsed();
    }

    /// Clamp cursor and selection into the document after external changes
    pub fn clamp_to(&mut self, document: &Document) {
        let clamp = |pos: Position| document.position_of(document.offset_of(pos));
        let anchor = clamp(self.selection.anchor);
        let head = clamp(self.cursor.to_position());
        let desired = self.cursor.desired_column;
        self.set_selection(Selection::from_anchor_head(anchor, head));
        self.cursor.desired_column = desired;
        self.viewport.top_line = self.viewport.top_line.min(self.max_top_line(document));
    }

    pub fn cursor_offset(&self, document: &Document) -> usize {
        document.offset_of(self.cursor.to_position())
    }

    pub fn resize_viewport(&mut self, visible_lines: usize, visible_columns: usize) {
        self.viewport.visible_lines = visible_lines;
        self.viewport.visible_columns = visible_columns;
    }

    /// Highest `top_line` that still fills the viewport
    pub fn max_top_line(&self, document: &Document) -> usize {
        document
            .line_count()
            .saturating_sub(self.viewport.visible_lines)
    }

    /// Scroll by a signed number of lines, clamped to the document
    pub fn scroll_by(&mut self, document: &Document, delta: isize) {
        let max_top = self.max_top_line(document);
        let top = self.viewport.top_line as isize + delta;
        self.viewport.top_line = top.clamp(0, max_top as isize) as usize;
    }

    /// Vertical scroll state in line units
    pub fn scroll_metrics(&self, document: &Document) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.viewport.top_line as f64,
            extent: document.line_count() as f64,
            viewport: self.viewport.visible_lines as f64,
        }
    }

    /// Move the cursor; with `extend` the selection anchor stays put.
    ///
    /// Without `extend`, Left/Right on a selection collapse it to its
    /// start/end instead of moving.
    pub fn move_cursor(&mut self, document: &Document, motion: Motion, extend: bool) {
        if !extend && self.has_selection() {
            match motion {
                Motion::Left => return self.set_cursor(self.selection.start()),
                Motion::Right => return self.set_cursor(self.selection.end()),
                _ => {}
            }
        }

        let here = self.cursor.to_position();
        let offset = document.offset_of(here);
        let page = self.viewport.visible_lines.saturating_sub(1).max(1);

        let (target, desired) = match motion {
            Motion::Left => (document.position_of(offset.saturating_sub(1)), None),
            Motion::Right => (document.position_of(offset + 1), None),
            Motion::Up => self.vertical_target(document, here.line.checked_sub(1)),
            Motion::Down => self.vertical_target(
                document,
                Some(here.line + 1).filter(|l| *l < document.line_count()),
            ),
            Motion::PageUp => {
                self.scroll_by(document, -(page as isize));
                self.vertical_target(document, Some(here.line.saturating_sub(page)))
            }
            Motion::PageDown => {
                self.scroll_by(document, page as isize);
                let last = document.line_count().saturating_sub(1);
                self.vertical_target(document, Some((here.line + page).min(last)))
            }
            Motion::WordLeft => (document.position_of(document.prev_word_boundary(offset)), None),
            Motion::WordRight => (document.position_of(document.next_word_boundary(offset)), None),
            Motion::LineStart => (Position::new(here.line, 0), None),
            Motion::LineEnd => (
                Position::new(here.line, document.line_length(here.line)),
                None,
            ),
            Motion::DocumentStart => (Position::new(0, 0), None),
            Motion::DocumentEnd => (document.position_of(document.len_chars()), None),
        };

        if extend {
            self.extend_to(target);
        } else {
            self.set_cursor(target);
        }
        self.cursor.desired_column = desired;
    }

    /// Position on `line` nearest the remembered column; stays put off either end
    fn vertical_target(
        &self,
        document: &Document,
        line: Option<usize>,
    ) -> (Position, Option<usize>) {
        let desired = self.cursor.desired_column.unwrap_or(self.cursor.column);
        match line {
            Some(line) => (
                Position::new(line, desired.min(document.line_length(line))),
                Some(desired),
            ),
            None if self.cursor.line == 0 => (Position::new(0, 0), None),
            None => {
                let last = self.cursor.line;
                (Position::new(last, document.line_length(last)), None)
            }
        }
    }

    /// Scroll the minimum amount needed to bring the cursor into view
    pub fn ensure_cursor_visible(&mut self, document: &Document) {
        let line = self.cursor.line;
        let visible = self.viewport.visible_lines;
        let total_lines = document.line_count();

        if total_lines > visible && visible > 0 {
            let max_top = total_lines - visible;
            let padding = SCROLL_PADDING.min(visible.saturating_sub(1) / 2);
            let safe_top = self.viewport.top_line + padding;
            let safe_bottom = (self.viewport.top_line + visible)
                .saturating_sub(padding)
                .saturating_sub(1);

            if line < safe_top {
                self.viewport.top_line = line.saturating_sub(padding);
            } else if line > safe_bottom {
                self.viewport.top_line = (line + padding + 1).saturating_sub(visible);
            }
            self.viewport.top_line = self.viewport.top_line.min(max_top);
        } else {
            self.viewport.top_line = 0;
        }

        let column = self.cursor.column;
        let left_safe = self.viewport.left_column.saturating_add(HORIZONTAL_MARGIN);
        let right_safe = self
            .viewport
            .left_column
            .saturating_add(self.viewport.visible_columns)
            .saturating_sub(HORIZONTAL_MARGIN);

        if column < left_safe {
            self.viewport.left_column = column.saturating_sub(HORIZONTAL_MARGIN);
        } else if column >= right_safe {
            self.viewport.left_column = column
                .saturating_add(HORIZONTAL_MARGIN)
                .saturating_add(1)
                .saturating_sub(self.viewport.visible_columns);
        }
    }
}
