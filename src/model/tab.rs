//! Tabs - one document with its editor state, scroll sync and preview bookkeeping

use std::fmt;
use std::path::Path;

use super::document::Document;
use super::editor::EditorState;
use crate::scroll_sync::ScrollSync;
use crate::theme::ThemeMode;

/// Unique identifier for a tab, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub document: Document,
    pub editor: EditorState,
    pub scroll_sync: ScrollSync,
    /// Document revision last pushed to the preview
    pub preview_revision: Option<u64>,
    /// Theme the preview page was last built with
    pub preview_theme: Option<ThemeMode>,
    /// The last push never reached a page, so the next one rebuilds it
    pub preview_reload: bool,
    /// Contents are still being read from disk
    pub loading: bool,
}

impl Tab {
    fn new(id: TabId, document: Document, sync_enabled: bool) -> Self {
        Self {
            id,
            document,
            editor: EditorState::new(),
            scroll_sync: ScrollSync::new(sync_enabled),
            preview_revision: None,
            preview_theme: None,
            preview_reload: false,
            loading: false,
        }
    }

    /// Whether the preview lags behind the document or the theme
    pub fn preview_is_stale(&self, theme: ThemeMode) -> bool {
        !self.loading
            && (self.preview_revision != Some(self.document.revision)
                || self.preview_theme != Some(theme))
    }

    /// Whether the next preview push must rebuild the whole page
    pub fn needs_full_reload(&self, theme: ThemeMode) -> bool {
        self.preview_reload
            || self.preview_revision.is_none()
            || self.preview_theme != Some(theme)
    }
}

/// The ordered tabs of the window and which one is active
#[derive(Debug, Clone, Default)]
pub struct TabSet {
    pub tabs: Vec<Tab>,
    /// Index into `tabs`; None only when there are no tabs
    pub active: Option<usize>,
    next_id: u64,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tab> {
        self.tabs.iter_mut()
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    /// Append a tab for `document` and make it active
    pub fn add(&mut self, document: Document, sync_enabled: bool) -> TabId {
        self.next_id += 1;
        let id = TabId(self.next_id);
        self.tabs.push(Tab::new(id, document, sync_enabled));
        self.active = Some(self.tabs.len() - 1);
        id
    }

    /// Remove a tab. When it was active, its right neighbour (or else the
    /// left one) becomes active.
    pub fn close(&mut self, id: TabId) -> Option<Tab> {
        let idx = self.index_of(id)?;
        let tab = self.tabs.remove(idx);

        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(active) if active == idx => Some(idx.min(self.tabs.len() - 1)),
            Some(active) if active > idx => Some(active - 1),
            other => other,
        };
        Some(tab)
    }

    /// Make a tab active; false if it does not exist
    pub fn activate(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Activate the next tab, wrapping around
    pub fn next(&mut self) {
        if let Some(active) = self.active {
            self.active = Some((active + 1) % self.tabs.len());
        }
    }

    /// Activate the previous tab, wrapping around
    pub fn prev(&mut self) {
        if let Some(active) = self.active {
            let len = self.tabs.len();
            self.active = Some((active + len - 1) % len);
        }
    }

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        let idx = self.active?;
        self.tabs.get_mut(idx)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active().map(|t| t.id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// The tab already showing `path`, if any
    pub fn find_by_path(&self, path: &Path) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|t| t.document.file_path.as_deref() == Some(path))
            .map(|t| t.id)
    }
}
