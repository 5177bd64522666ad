//! Preview messages: scroll reports from the webview and the sync toggle

use crate::commands::Cmd;
use crate::messages::PreviewMsg;
use crate::model::{AppModel, TabId};
use crate::scroll_sync::PreviewEvent;

pub fn update_preview(model: &mut AppModel, msg: PreviewMsg) -> Option<Cmd> {
    match msg {
        PreviewMsg::Message { tab_id, payload } => match PreviewEvent::parse(&payload)? {
            PreviewEvent::Scroll { percent } => apply_preview_scroll(model, tab_id, percent),
        },

        PreviewMsg::ToggleScrollSync => {
            let tab = model.tabs.active_mut()?;
            let enabled = tab.scroll_sync.toggle();
            tracing::debug!(tab = %tab.id, enabled, "scroll sync toggled");
            model.ui.set_transient(if enabled {
                "Scroll sync enabled"
            } else {
                "Scroll sync disabled"
            });
            Some(Cmd::Redraw)
        }

        PreviewMsg::RenderFailed { tab_id } => {
            // not marked stale, so a failing webview is not retried in a loop
            let tab = model.tabs.get_mut(tab_id)?;
            tab.preview_reload = true;
            None
        }
    }
}

/// Scroll the editor to the fraction the preview reported.
///
/// The new offset is recorded through `editor_scrolled` while the preview
/// guard is held, so it is not forwarded back to the preview.
fn apply_preview_scroll(model: &mut AppModel, tab_id: TabId, percent: f64) -> Option<Cmd> {
    let tab = model.tabs.get_mut(tab_id)?;
    if !tab.scroll_sync.begin_preview_scroll() {
        tracing::debug!(tab = %tab_id, "ignoring preview scroll");
        return None;
    }

    let metrics = tab.editor.scroll_metrics(&tab.document);
    let max_top = tab.editor.max_top_line(&tab.document);
    let top_line = metrics
        .offset_for(percent.clamp(0.0, 1.0))
        .map_or(0, |offset| offset.round() as usize)
        .min(max_top);

    let changed = tab.editor.viewport.top_line != top_line;
    tab.editor.viewport.top_line = top_line;
    let metrics = tab.editor.scroll_metrics(&tab.document);
    tab.scroll_sync.editor_scrolled(metrics);
    tab.scroll_sync.end_preview_scroll();

    changed.then_some(Cmd::Redraw)
}
