//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. After each
//! message the active tab's editor scroll is forwarded to its preview and
//! stale previews are re-rendered.

mod app;
mod document;
mod editor;
mod export;
mod format;
pub mod layout;
mod preview;
mod ui;

use crate::commands::Cmd;
use crate::markdown::{preview_document, preview_update_script, PreviewTheme};
use crate::messages::Msg;
use crate::model::{AppModel, TabId};

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use document::update_document;
pub use editor::update_editor;
pub use export::update_export;
pub use format::update_format;
pub use layout::update_layout;
pub use preview::update_preview;
pub use ui::{update_ui, CURSOR_BLINK_INTERVAL};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let scroll_before = model
        .active_tab()
        .map(|tab| (tab.id, tab.editor.viewport.top_line));

    let result = match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Document(m) => document::update_document(model, m),
        Msg::Format(m) => format::update_format(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Preview(m) => preview::update_preview(model, m),
        Msg::Export(m) => export::update_export(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    let mut cmds = vec![result.unwrap_or_default()];
    cmds.extend(forward_editor_scroll(model, scroll_before));
    settle_scroll_offsets(model);
    cmds.extend(refresh_previews(model));

    match Cmd::batch(cmds) {
        Cmd::None => None,
        cmd => Some(cmd),
    }
}

/// Forward a vertical editor scroll of the active tab to its preview
fn forward_editor_scroll(
    model: &mut AppModel,
    before: Option<(TabId, usize)>,
) -> Option<Cmd> {
    let (tab_id, top_before) = before?;
    let tab = model.tabs.active_mut()?;
    if tab.id != tab_id || tab.editor.viewport.top_line == top_before {
        return None;
    }

    let metrics = tab.editor.scroll_metrics(&tab.document);
    let fraction = tab.scroll_sync.editor_scrolled(metrics)?;
    tab.scroll_sync.end_editor_scroll();
    tracing::debug!(tab = %tab_id, fraction, "forwarding editor scroll");
    Some(Cmd::ScrollPreview { tab_id, fraction })
}

/// Record every tab's current editor offset.
///
/// `top_line` can move without a forwarded scroll (resize clamps, reloads,
/// background tabs), and the next real scroll is measured from here.
fn settle_scroll_offsets(model: &mut AppModel) {
    for tab in model.tabs.iter_mut() {
        let offset = tab.editor.scroll_metrics(&tab.document).offset;
        tab.scroll_sync.record_offset(offset);
    }
}

/// Render every preview that lags behind its document or the theme
fn refresh_previews(model: &mut AppModel) -> Vec<Cmd> {
    let mode = model.theme_mode;
    let editor_theme = &model.theme;
    let mut theme = None;
    let mut cmds = Vec::new();

    for tab in model.tabs.iter_mut() {
        if !tab.preview_is_stale(mode) {
            continue;
        }
        let full_reload = tab.needs_full_reload(mode);
        let text = tab.document.text();
        let html = if full_reload {
            let theme = theme.get_or_insert_with(|| PreviewTheme::from_editor_theme(editor_theme));
            preview_document(&text, theme)
        } else {
            preview_update_script(&text)
        };

        tab.preview_revision = Some(tab.document.revision);
        tab.preview_theme = Some(mode);
        tab.preview_reload = false;
        cmds.push(Cmd::RenderPreview {
            tab_id: tab.id,
            html,
            full_reload,
        });
    }
    cmds
}

/// Traced update wrapper (debug builds only)
///
/// Filters out noisy messages like BlinkCursor from logging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::UiMsg;

    let is_noisy = matches!(&msg, Msg::Ui(UiMsg::BlinkCursor));
    if is_noisy {
        return update_inner(model, msg);
    }

    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = model
        .active_tab()
        .map(|tab| (tab.editor.cursor.to_position(), tab.document.revision));
    let result = update_inner(model, msg);
    let after = model
        .active_tab()
        .map(|tab| (tab.editor.cursor.to_position(), tab.document.revision));

    if before != after {
        debug!(target: "cursor", ?before, ?after, "state changed");
    }
    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Editor::MoveCursor(Up)`
/// - `App::Resize(1920, 1080)`
///
/// Inserted text is left out so document contents never reach the log.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, DocumentMsg};

    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Document(DocumentMsg::InsertChar(_)) => "Document::InsertChar".to_string(),
        Msg::Document(DocumentMsg::InsertText(_)) => "Document::InsertText".to_string(),
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Format(m) => format!("Format::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Preview(m) => format!("Preview::{:?}", m),
        Msg::Export(m) => format!("Export::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
        Msg::App(AppMsg::FileLoaded { tab_id, result }) => {
            format!("App::FileLoaded({}, ok={})", tab_id, result.is_ok())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
