//! Markdown formatting commands applied to the active tab

use crate::commands::Cmd;
use crate::format::{apply_style, insert_link, toggle_blockquote};
use crate::messages::FormatMsg;
use crate::model::AppModel;

use super::document::apply_text_edit;

pub fn update_format(model: &mut AppModel, msg: FormatMsg) -> Option<Cmd> {
    let tab = model.tabs.active_mut()?;
    if tab.loading {
        return None;
    }

    let buffer = &tab.document.buffer;
    let selection = tab.document.selection_range(&tab.editor.selection);
    let edit = match msg {
        FormatMsg::Style(style) => apply_style(buffer, selection, style),
        FormatMsg::InsertLink => insert_link(buffer, selection),
        FormatMsg::ToggleBlockquote => {
            toggle_blockquote(buffer, tab.editor.cursor_offset(&tab.document))
        }
    };

    if !apply_text_edit(tab, edit) {
        return None;
    }
    tab.editor.ensure_cursor_visible(&tab.document);
    model.ui.reset_cursor_blink();
    Some(Cmd::Redraw)
}
