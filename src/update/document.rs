//! Document update functions for text editing, undo/redo and the clipboard

use std::ops::Range;

use crate::commands::Cmd;
use crate::format::TextEdit;
use crate::messages::DocumentMsg;
use crate::model::{AppModel, Tab};
use crate::util::text::TABULATOR_WIDTH;

/// Handle document messages (text editing, undo/redo)
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let tab = model.tabs.active_mut()?;
    if tab.loading {
        return None;
    }

    match msg {
        DocumentMsg::InsertChar(ch) => {
            let mut buf = [0u8; 4];
            insert_text(tab, ch.encode_utf8(&mut buf));
        }

        DocumentMsg::InsertText(text) => insert_text(tab, &text),

        DocumentMsg::InsertNewline => insert_text(tab, "\n"),

        DocumentMsg::InsertTab => insert_text(tab, &" ".repeat(TABULATOR_WIDTH)),

        DocumentMsg::DeleteBackward => {
            let range = selection_or(tab, |tab, caret| {
                let mut start = caret.saturating_sub(1);
                if start > 0 && tab.document.slice_to_string(start - 1..caret) == "\r\n" {
                    start -= 1;
                }
                start..caret
            });
            delete_range(tab, range);
        }

        DocumentMsg::DeleteForward => {
            let range = selection_or(tab, |tab, caret| {
                let mut end = (caret + 1).min(tab.document.len_chars());
                if tab.document.slice_to_string(caret..caret + 2) == "\r\n" {
                    end = caret + 2;
                }
                caret..end
            });
            delete_range(tab, range);
        }

        DocumentMsg::DeleteWordBackward => {
            let range =
                selection_or(tab, |tab, caret| tab.document.prev_word_boundary(caret)..caret);
            delete_range(tab, range);
        }

        DocumentMsg::DeleteWordForward => {
            let range =
                selection_or(tab, |tab, caret| caret..tab.document.next_word_boundary(caret));
            delete_range(tab, range);
        }

        DocumentMsg::Undo => {
            let selection = tab.document.undo()?;
            tab.editor.set_selection(selection);
            tab.editor.clamp_to(&tab.document);
        }

        DocumentMsg::Redo => {
            let selection = tab.document.redo()?;
            tab.editor.set_selection(selection);
            tab.editor.clamp_to(&tab.document);
        }

        DocumentMsg::Copy => {
            let range = clipboard_range(tab);
            let text = tab.document.slice_to_string(range);
            if text.is_empty() {
                return None;
            }
            set_clipboard(&text);
            model
                .ui
                .set_transient(format!("Copied {} chars", text.chars().count()));
            return Some(Cmd::Redraw);
        }

        DocumentMsg::Cut => {
            let range = clipboard_range(tab);
            let text = tab.document.slice_to_string(range.clone());
            if text.is_empty() {
                return None;
            }
            set_clipboard(&text);
            delete_range(tab, range);
            tab.editor.ensure_cursor_visible(&tab.document);
            model
                .ui
                .set_transient(format!("Cut {} chars", text.chars().count()));
            model.ui.reset_cursor_blink();
            return Some(Cmd::Redraw);
        }

        DocumentMsg::Paste => {
            let text = get_clipboard()?;
            if text.is_empty() {
                return None;
            }
            insert_text(tab, &text);
        }
    }

    tab.editor.ensure_cursor_visible(&tab.document);
    model.ui.reset_cursor_blink();
    Some(Cmd::Redraw)
}

/// Apply a [`TextEdit`] to a tab as one undo step and adopt its selection
pub(crate) fn apply_text_edit(tab: &mut Tab, edit: TextEdit) -> bool {
    let before = tab.editor.selection;
    match tab
        .document
        .apply_edit(edit.range, &edit.replacement, before, edit.selection)
    {
        Some(selection) => {
            tab.editor.set_selection(selection);
            true
        }
        None => false,
    }
}

/// Replace the selection (or insert at the caret) and leave the caret after the text
fn insert_text(tab: &mut Tab, text: &str) {
    let range = tab.document.selection_range(&tab.editor.selection);
    let caret = range.start + text.chars().count();
    apply_text_edit(
        tab,
        TextEdit {
            range,
            replacement: text.to_string(),
            selection: caret..caret,
        },
    );
}

fn delete_range(tab: &mut Tab, range: Range<usize>) {
    let caret = range.start;
    apply_text_edit(
        tab,
        TextEdit {
            range,
            replacement: String::new(),
            selection: caret..caret,
        },
    );
}

/// The selected range, or `fallback(caret)` when nothing is selected
fn selection_or(tab: &Tab, fallback: impl FnOnce(&Tab, usize) -> Range<usize>) -> Range<usize> {
    if tab.editor.has_selection() {
        tab.document.selection_range(&tab.editor.selection)
    } else {
        fallback(tab, tab.editor.cursor_offset(&tab.document))
    }
}

/// Selection range, or the cursor's whole line including its line break
fn clipboard_range(tab: &Tab) -> Range<usize> {
    if tab.editor.has_selection() {
        return tab.document.selection_range(&tab.editor.selection);
    }
    let line = tab.editor.cursor.line;
    let start = tab.document.line_start(line);
    let end = if line + 1 < tab.document.line_count() {
        tab.document.line_start(line + 1)
    } else {
        tab.document.len_chars()
    };
    start..end
}

fn set_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!("Failed to write clipboard: {}", e);
            }
        }
        Err(e) => tracing::warn!("Clipboard unavailable: {}", e),
    }
}

fn get_clipboard() -> Option<String> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| tracing::warn!("Clipboard unavailable: {}", e))
        .ok()?;
    clipboard.get_text().ok()
}
