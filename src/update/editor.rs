//! Editor update functions for cursor movement, selection and scrolling

use crate::commands::Cmd;
use crate::messages::{Direction, EditorMsg};
use crate::model::{AppModel, Document, Motion, Position, Selection};

fn motion_for(direction: Direction) -> Motion {
    match direction {
        Direction::Up => Motion::Up,
        Direction::Down => Motion::Down,
        Direction::Left => Motion::Left,
        Direction::Right => Motion::Right,
    }
}

fn word_motion_for(direction: Direction) -> Motion {
    match direction {
        Direction::Left => Motion::WordLeft,
        Direction::Right => Motion::WordRight,
        vertical => motion_for(vertical),
    }
}

/// Handle editor messages (cursor movement, selection, viewport)
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    let tab = model.tabs.active_mut()?;
    let document = &tab.document;
    let editor = &mut tab.editor;

    let movement = match msg {
        EditorMsg::MoveCursor(dir) => Some((motion_for(dir), false)),
        EditorMsg::MoveCursorLineStart => Some((Motion::LineStart, false)),
        EditorMsg::MoveCursorLineEnd => Some((Motion::LineEnd, false)),
        EditorMsg::MoveCursorDocumentStart => Some((Motion::DocumentStart, false)),
        EditorMsg::MoveCursorDocumentEnd => Some((Motion::DocumentEnd, false)),
        EditorMsg::MoveCursorWord(dir) => Some((word_motion_for(dir), false)),
        EditorMsg::PageUp => Some((Motion::PageUp, false)),
        EditorMsg::PageDown => Some((Motion::PageDown, false)),

        EditorMsg::MoveCursorWithSelection(dir) => Some((motion_for(dir), true)),
        EditorMsg::MoveCursorLineStartWithSelection => Some((Motion::LineStart, true)),
        EditorMsg::MoveCursorLineEndWithSelection => Some((Motion::LineEnd, true)),
        EditorMsg::MoveCursorDocumentStartWithSelection => Some((Motion::DocumentStart, true)),
        EditorMsg::MoveCursorDocumentEndWithSelection => Some((Motion::DocumentEnd, true)),
        EditorMsg::MoveCursorWordWithSelection(dir) => Some((word_motion_for(dir), true)),
        EditorMsg::PageUpWithSelection => Some((Motion::PageUp, true)),
        EditorMsg::PageDownWithSelection => Some((Motion::PageDown, true)),

        EditorMsg::Scroll(lines) => {
            editor.scroll_by(document, lines as isize);
            return Some(Cmd::Redraw);
        }

        EditorMsg::ScrollHorizontal(columns) => {
            let left = editor.viewport.left_column as isize + columns as isize;
            editor.viewport.left_column = left.max(0) as usize;
            return Some(Cmd::Redraw);
        }

        EditorMsg::SetCursorPosition { line, column } => {
            let pos = clamp_position(document, line, column);
            editor.set_cursor(pos);
            None
        }

        EditorMsg::ExtendSelectionToPosition { line, column } => {
            let pos = clamp_position(document, line, column);
            editor.extend_to(pos);
            None
        }

        EditorMsg::SelectWordAt { line, column } => {
            let offset = document.offset_of(clamp_position(document, line, column));
            let word = document.word_range_at(offset);
            editor.set_selection(Selection::from_anchor_head(
                document.position_of(word.start),
                document.position_of(word.end),
            ));
            None
        }

        EditorMsg::SelectAll => {
            let end = document.position_of(document.len_chars());
            editor.set_selection(Selection::from_anchor_head(Position::new(0, 0), end));
            None
        }

        EditorMsg::ClearSelection => {
            editor.clear_selection();
            None
        }
    };

    if let Some((motion, extend)) = movement {
        editor.move_cursor(document, motion, extend);
    }
    editor.ensure_cursor_visible(document);
    model.ui.reset_cursor_blink();
    Some(Cmd::Redraw)
}

/// Snap a (possibly out of range) line/column to a real position
fn clamp_position(document: &Document, line: usize, column: usize) -> Position {
    let last_line = document.line_count().saturating_sub(1);
    let line = line.min(last_line);
    Position::new(line, column.min(document.line_length(line)))
}
