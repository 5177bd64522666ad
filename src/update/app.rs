//! App message handlers (file operations, window events)

use std::path::{Path, PathBuf};

use crate::commands::{Cmd, MessageLevel};
use crate::messages::AppMsg;
use crate::model::{AppModel, Document, TabId};

use super::layout::{after_close, close_tab, continue_quit, request_close};

/// Extension given to a save path chosen without one
const MARKDOWN_EXTENSION: &str = "md";

/// Handle app messages (file operations, window events)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            model.resize(width, height);
            Some(Cmd::Redraw)
        }

        AppMsg::OpenFileDialog => Some(Cmd::ShowOpenFileDialog {
            start_dir: active_dir(model),
        }),

        AppMsg::OpenFileDialogResult { paths } | AppMsg::OpenFiles(paths) => {
            let cmds = paths
                .into_iter()
                .map(|path| open_path(model, path))
                .collect();
            Some(Cmd::batch(vec![Cmd::batch(cmds), Cmd::Redraw]))
        }

        AppMsg::FileLoaded { tab_id, result } => {
            let tab = model.tabs.get_mut(tab_id)?;
            match result {
                Ok(content) => {
                    tab.document.set_text_from_load(&content);
                    tab.loading = false;
                    tab.editor.clamp_to(&tab.document);
                    if let Some(path) = &tab.document.file_path {
                        tracing::info!("Loaded {}", path.display());
                    }
                    Some(Cmd::Redraw)
                }
                Err(e) => {
                    tracing::warn!("Load failed for {}: {}", tab_id, e);
                    close_tab(model, tab_id);
                    Some(Cmd::batch(vec![
                        error_message(format!("Error loading file: {}", e)),
                        Cmd::Redraw,
                    ]))
                }
            }
        }

        AppMsg::SaveFile => {
            let tab_id = model.tabs.active_id()?;
            save_tab(model, tab_id)
        }

        AppMsg::SaveFileAs => {
            let tab_id = model.tabs.active_id()?;
            save_as_dialog(model, tab_id)
        }

        AppMsg::SaveFileAsDialogResult { tab_id, path } => match path {
            Some(path) => write_tab(model, tab_id, with_default_extension(path)),
            None => {
                if model.ui.pending_close == Some(tab_id) {
                    model.ui.cancel_close();
                }
                Some(Cmd::Redraw)
            }
        },

        AppMsg::SaveCompleted {
            tab_id,
            path,
            revision,
            result,
        } => match result {
            Ok(()) => {
                tracing::info!("Saved {}", path.display());
                if let Some(tab) = model.tabs.get_mut(tab_id) {
                    tab.document.mark_saved(path.clone(), revision);
                }
                model.ui.set_transient(format!("Saved: {}", path.display()));

                if model.ui.pending_close != Some(tab_id) {
                    return Some(Cmd::Redraw);
                }
                let edited_during_save = model
                    .tabs
                    .get(tab_id)
                    .is_some_and(|tab| tab.document.is_modified);
                if edited_during_save {
                    // ask again rather than drop the newer edits
                    model.ui.pending_close = None;
                    Some(Cmd::batch(vec![
                        request_close(model, tab_id).unwrap_or(Cmd::None),
                        Cmd::Redraw,
                    ]))
                } else {
                    close_tab(model, tab_id);
                    after_close(model)
                }
            }
            Err(e) => {
                tracing::error!("Save failed for {}: {}", path.display(), e);
                if model.ui.pending_close == Some(tab_id) {
                    model.ui.cancel_close();
                }
                model.ui.set_transient("Save failed");
                Some(Cmd::batch(vec![
                    error_message(format!("Error saving file: {}", e)),
                    Cmd::Redraw,
                ]))
            }
        },

        AppMsg::ToggleTheme => {
            let mode = model.theme_mode.toggle();
            model.set_theme_mode(mode);
            tracing::info!("Switched to {} theme", mode.id());
            Some(Cmd::batch(vec![
                Cmd::SaveConfig(model.config.clone()),
                Cmd::Redraw,
            ]))
        }

        AppMsg::QuitRequested => {
            if model.ui.pending_close.is_some() {
                return None;
            }
            model.ui.quitting = true;
            continue_quit(model)
        }
    }
}

/// Open `path` in a new loading tab, or activate the tab that already has it
fn open_path(model: &mut AppModel, path: PathBuf) -> Cmd {
    let path = std::fs::canonicalize(&path).unwrap_or(path);
    if let Some(existing) = model.tabs.find_by_path(&path) {
        model.tabs.activate(existing);
        return Cmd::None;
    }

    let tab_id = model.add_tab(Document::pending_load(path.clone()));
    if let Some(tab) = model.tabs.get_mut(tab_id) {
        tab.loading = true;
    }
    Cmd::LoadFile { tab_id, path }
}

/// Save a tab to its path, or ask for one first
pub(super) fn save_tab(model: &mut AppModel, tab_id: TabId) -> Option<Cmd> {
    let tab = model.tabs.get(tab_id)?;
    if tab.loading {
        return None;
    }
    match tab.document.file_path.clone() {
        Some(path) => write_tab(model, tab_id, path),
        None => save_as_dialog(model, tab_id),
    }
}

fn save_as_dialog(model: &mut AppModel, tab_id: TabId) -> Option<Cmd> {
    let tab = model.tabs.get(tab_id)?;
    if tab.loading {
        return None;
    }
    Some(Cmd::ShowSaveFileDialog {
        tab_id,
        suggested_name: tab.document.file_name(),
        start_dir: parent_dir(tab.document.file_path.as_deref()),
    })
}

/// Capture the tab's content and revision for a background write
fn write_tab(model: &mut AppModel, tab_id: TabId, path: PathBuf) -> Option<Cmd> {
    let tab = model.tabs.get(tab_id)?;
    let cmd = Cmd::SaveFile {
        tab_id,
        path,
        content: tab.document.text(),
        revision: tab.document.revision,
    };
    model.ui.set_transient("Saving...");
    Some(cmd)
}

/// Directory of the active tab's file, used to seed file dialogs
pub(super) fn active_dir(model: &AppModel) -> Option<PathBuf> {
    parent_dir(model.active_tab()?.document.file_path.as_deref())
}

fn parent_dir(path: Option<&Path>) -> Option<PathBuf> {
    path?.parent().map(Path::to_path_buf)
}

/// Give an extension-less save path the Markdown extension
pub(super) fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(MARKDOWN_EXTENSION)
    }
}

pub(super) fn error_message(text: String) -> Cmd {
    Cmd::ShowMessage {
        level: MessageLevel::Error,
        title: "Error".to_string(),
        text,
    }
}
