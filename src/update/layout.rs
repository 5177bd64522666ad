//! Tab management and the close/quit flow
//!
//! Closing a dirty tab is a small state machine driven by `ui.pending_close`:
//! the prompt answer arrives as `CloseConfirmed`, and a "save" answer only
//! closes the tab once `SaveCompleted` reports success. A window close
//! request sets `ui.quitting` and walks the remaining tabs one at a time.

use crate::commands::Cmd;
use crate::messages::{CloseChoice, LayoutMsg};
use crate::model::{AppModel, Document, TabId};

use super::app::save_tab;

/// Handle tab messages
pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::NewTab => {
            model.add_tab(Document::new());
            Some(Cmd::Redraw)
        }

        LayoutMsg::NextTab => {
            model.tabs.next();
            model.ui.reset_cursor_blink();
            Some(Cmd::Redraw)
        }

        LayoutMsg::PrevTab => {
            model.tabs.prev();
            model.ui.reset_cursor_blink();
            Some(Cmd::Redraw)
        }

        LayoutMsg::ActivateTab(id) => {
            if model.tabs.activate(id) {
                model.ui.reset_cursor_blink();
            }
            Some(Cmd::Redraw)
        }

        LayoutMsg::CloseTab(id) => request_close(model, id),

        LayoutMsg::CloseActiveTab => {
            let id = model.tabs.active_id()?;
            request_close(model, id)
        }

        LayoutMsg::CloseConfirmed { tab_id, choice } => {
            if model.ui.pending_close != Some(tab_id) {
                return None;
            }
            match choice {
                CloseChoice::Cancel => {
                    model.ui.cancel_close();
                    Some(Cmd::Redraw)
                }
                CloseChoice::Discard => {
                    close_tab(model, tab_id);
                    after_close(model)
                }
                CloseChoice::Save => match save_tab(model, tab_id) {
                    Some(cmd) => Some(cmd),
                    None => {
                        model.ui.cancel_close();
                        Some(Cmd::Redraw)
                    }
                },
            }
        }
    }
}

/// Close a tab, or ask first when it has unsaved changes.
///
/// Ignored while another close is waiting on an answer.
pub(super) fn request_close(model: &mut AppModel, id: TabId) -> Option<Cmd> {
    if model.ui.pending_close.is_some() {
        return None;
    }
    let tab = model.tabs.get(id)?;

    if tab.document.is_modified {
        let file_name = tab.document.file_name();
        model.ui.pending_close = Some(id);
        model.tabs.activate(id);
        Some(Cmd::ConfirmClose {
            tab_id: id,
            file_name,
        })
    } else {
        close_tab(model, id);
        after_close(model)
    }
}

/// Remove a tab without asking
pub(super) fn close_tab(model: &mut AppModel, id: TabId) {
    if model.tabs.close(id).is_some() {
        tracing::info!("Closed {}", id);
    }
    if model.ui.pending_close == Some(id) {
        model.ui.pending_close = None;
    }
    model.ui.reset_cursor_blink();
}

/// Continue a quit in progress after a tab went away
pub(super) fn after_close(model: &mut AppModel) -> Option<Cmd> {
    if model.ui.quitting {
        continue_quit(model)
    } else {
        Some(Cmd::Redraw)
    }
}

/// Close every clean tab, then prompt for the first dirty one.
/// Emits `Cmd::Quit` once no tabs remain.
pub(super) fn continue_quit(model: &mut AppModel) -> Option<Cmd> {
    let clean: Vec<TabId> = model
        .tabs
        .iter()
        .filter(|tab| !tab.document.is_modified)
        .map(|tab| tab.id)
        .collect();
    for id in clean {
        close_tab(model, id);
    }

    match model.tabs.ids().first().copied() {
        Some(id) => request_close(model, id),
        None => {
            model.ui.quitting = false;
            tracing::info!("All tabs closed, quitting");
            Some(Cmd::Quit)
        }
    }
}
