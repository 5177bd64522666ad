//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use markpane::commands::Cmd;
use markpane::config::EditorConfig;
use markpane::model::{AppModel, Document, Position, Selection, Tab, Viewport};

/// Model with no tabs and default config
pub fn empty_model() -> AppModel {
    AppModel::new(EditorConfig::default(), 800, 600)
}

/// Create a test model with one tab holding `text` and the cursor at (line, column)
pub fn test_model(text: &str, line: usize, column: usize) -> AppModel {
    let mut model = empty_model();
    model.add_tab(Document::with_text(text));
    let mode = model.theme_mode;
    let tab = model.active_tab_mut().expect("tab just added");
    tab.editor.viewport = Viewport::new(25, 80);
    tab.editor.set_cursor(Position::new(line, column));
    // the initial render is not what these tests look at
    tab.preview_revision = Some(tab.document.revision);
    tab.preview_theme = Some(mode);
    model
}

/// Create a test model with a selection from anchor to head; the cursor is at the head
pub fn test_model_with_selection(
    text: &str,
    anchor_line: usize,
    anchor_col: usize,
    head_line: usize,
    head_col: usize,
) -> AppModel {
    let mut model = test_model(text, head_line, head_col);
    let tab = model.active_tab_mut().expect("tab just added");
    tab.editor.set_selection(Selection::from_anchor_head(
        Position::new(anchor_line, anchor_col),
        Position::new(head_line, head_col),
    ));
    model
}

/// `count` numbered lines: "line 0\nline 1\n..."
pub fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn active(model: &AppModel) -> &Tab {
    model.active_tab().expect("an active tab")
}

/// Helper to get the active buffer as a string
pub fn buffer_to_string(model: &AppModel) -> String {
    active(model).document.text()
}

pub fn cursor(model: &AppModel) -> (usize, usize) {
    let cursor = &active(model).editor.cursor;
    (cursor.line, cursor.column)
}

/// Every command in a (possibly batched) result
pub fn flatten(cmd: Option<Cmd>) -> Vec<Cmd> {
    cmd.map(Cmd::flatten).unwrap_or_default()
}
