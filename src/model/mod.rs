//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod editor;
pub mod tab;
pub mod ui;

pub use document::{Document, EditOperation, UNTITLED_NAME};
pub use editor::{Cursor, EditorState, Motion, Position, Selection, Viewport};
pub use tab::{Tab, TabId, TabSet};
pub use ui::{TransientMessage, UiState};

use crate::config::EditorConfig;
use crate::layout::Layout;
use crate::theme::{theme_for_mode, Theme, ThemeMode};
use crate::util::text::word_count_label;

/// Application name, used for the window title
pub const APP_NAME: &str = "Markpane";

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub tabs: TabSet,
    /// UI state (status bar, cursor blink, close flow)
    pub ui: UiState,
    /// Resolved colors for `theme_mode`
    pub theme: Theme,
    pub theme_mode: ThemeMode,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Scroll sync state for newly created tabs
    pub sync_default: bool,
    /// Window dimensions in physical pixels
    pub window_size: (u32, u32),
    /// Line height in pixels
    pub line_height: usize,
    /// Character width in pixels (monospace)
    pub char_width: f32,
}

impl AppModel {
    /// Create a model with no tabs. The theme comes from `config.theme`.
    pub fn new(config: EditorConfig, window_width: u32, window_height: u32) -> Self {
        let theme_mode = config.theme;
        Self {
            tabs: TabSet::new(),
            ui: UiState::new(),
            theme: theme_for_mode(theme_mode),
            theme_mode,
            sync_default: config.scroll_sync,
            config,
            window_size: (window_width, window_height),
            // corrected by the renderer from real font metrics
            line_height: 20,
            char_width: 10.0,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::for_model(self)
    }

    /// Add a tab sized to the current layout and make it active
    pub fn add_tab(&mut self, document: Document) -> TabId {
        let layout = self.layout();
        let id = self.tabs.add(document, self.sync_default);
        if let Some(tab) = self.tabs.get_mut(id) {
            tab.editor
                .resize_viewport(layout.visible_lines(), layout.visible_columns());
        }
        self.ui.reset_cursor_blink();
        id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.active()
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.active_mut()
    }

    /// Update window dimensions and every tab's viewport
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.refresh_viewports();
    }

    /// Update font metrics from the renderer
    pub fn set_font_metrics(&mut self, line_height: usize, char_width: f32) {
        self.line_height = line_height.max(1);
        self.char_width = char_width.max(1.0);
        self.refresh_viewports();
    }

    fn refresh_viewports(&mut self) {
        let layout = self.layout();
        let (lines, columns) = (layout.visible_lines(), layout.visible_columns());
        for tab in self.tabs.iter_mut() {
            tab.editor.resize_viewport(lines, columns);
            let max_top = tab.editor.max_top_line(&tab.document);
            tab.editor.viewport.top_line = tab.editor.viewport.top_line.min(max_top);
        }
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = theme_for_mode(mode);
        self.config.theme = mode;
    }

    /// `"*notes.md - Markpane"` for a dirty active tab, `"Markpane"` with no tabs
    pub fn window_title(&self) -> String {
        match self.tabs.active() {
            Some(tab) => {
                let dirty = if tab.document.is_modified { "*" } else { "" };
                format!("{}{} - {}", dirty, tab.document.file_name(), APP_NAME)
            }
            None => APP_NAME.to_string(),
        }
    }

    /// Left side of the status bar: a transient message, else the file path
    pub fn status_text(&self) -> String {
        if let Some(msg) = &self.ui.transient_message {
            return msg.text.clone();
        }
        match self.tabs.active() {
            Some(tab) if tab.loading => "Loading...".to_string(),
            Some(tab) => match &tab.document.file_path {
                Some(path) => path.display().to_string(),
                None => self.ui.status_message.clone(),
            },
            None => self.ui.status_message.clone(),
        }
    }

    /// `Ln x, Col y` for the active tab (1-based)
    pub fn cursor_label(&self) -> Option<String> {
        let tab = self.tabs.active()?;
        Some(format!(
            "Ln {}, Col {}",
            tab.editor.cursor.line + 1,
            tab.editor.cursor.column + 1
        ))
    }

    pub fn word_count_label(&self) -> String {
        let count = self.tabs.active().map_or(0, |t| t.document.word_count());
        word_count_label(count)
    }

    /// Whether the active tab has scroll sync on (off without tabs)
    pub fn sync_enabled(&self) -> bool {
        self.tabs.active().is_some_and(|t| t.scroll_sync.enabled)
    }

    pub fn sync_label(&self) -> &'static str {
        if self.sync_enabled() {
            "Sync: on"
        } else {
            "Sync: off"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model() -> AppModel {
        AppModel::new(EditorConfig::default(), 1000, 700)
    }

    #[test]
    fn empty_model_reports_neutral_state() {
        let model = model();
        assert_eq!(model.window_title(), "Markpane");
        assert_eq!(model.word_count_label(), "0 words");
        assert_eq!(model.sync_label(), "Sync: off");
        assert!(model.cursor_label().is_none());
    }

    #[test]
    fn title_tracks_dirty_state() {
        let mut model = model();
        let mut doc = Document::with_text("hello world");
        doc.file_path = Some(PathBuf::from("/tmp/notes.md"));
        model.add_tab(doc);
        assert_eq!(model.window_title(), "notes.md - Markpane");
        assert_eq!(model.word_count_label(), "2 words");
        assert_eq!(model.sync_label(), "Sync: on");

        if let Some(tab) = model.active_tab_mut() {
            tab.document.is_modified = true;
        }
        assert_eq!(model.window_title(), "*notes.md - Markpane");
        assert_eq!(model.status_text(), "/tmp/notes.md");
    }

    #[test]
    fn new_tabs_follow_sync_default_and_layout() {
        let mut model = model();
        model.sync_default = false;
        let id = model.add_tab(Document::new());
        let tab = model.tabs.get(id).expect("tab");
        assert!(!tab.scroll_sync.enabled);
        assert_eq!(tab.editor.viewport.visible_lines, model.layout().visible_lines());
    }

    #[test]
    fn resize_updates_all_viewports() {
        let mut model = model();
        let a = model.add_tab(Document::new());
        let b = model.add_tab(Document::new());
        model.resize(1000, 300);
        let lines = model.layout().visible_lines();
        for id in [a, b] {
            assert_eq!(model.tabs.get(id).map(|t| t.editor.viewport.visible_lines), Some(lines));
        }
    }
}
