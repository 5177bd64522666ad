//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::model::TabId;

/// Severity of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the window
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === File I/O ===
    /// Read a file in the background, answering with `AppMsg::FileLoaded`
    LoadFile { tab_id: TabId, path: PathBuf },
    /// Write `content` captured at `revision`, answering with `AppMsg::SaveCompleted`
    SaveFile {
        tab_id: TabId,
        path: PathBuf,
        content: String,
        revision: u64,
    },
    /// Write an exported HTML page, answering with `ExportMsg::ExportCompleted`
    WriteExport { path: PathBuf, html: String },

    // === Dialogs ===
    /// Multi-select Markdown open dialog
    ShowOpenFileDialog { start_dir: Option<PathBuf> },
    /// Markdown save dialog for a tab
    ShowSaveFileDialog {
        tab_id: TabId,
        suggested_name: String,
        start_dir: Option<PathBuf>,
    },
    /// HTML export destination dialog
    ShowExportDialog {
        tab_id: TabId,
        suggested_name: String,
        start_dir: Option<PathBuf>,
    },
    /// Yes/No/Cancel prompt for a tab with unsaved changes
    ConfirmClose { tab_id: TabId, file_name: String },
    /// Informational or error message box
    ShowMessage {
        level: MessageLevel,
        title: String,
        text: String,
    },

    // === Preview ===
    /// Push rendered content to a tab's webview
    RenderPreview {
        tab_id: TabId,
        html: String,
        /// Load `html` as a whole page instead of running it as a content script
        full_reload: bool,
    },
    /// Scroll a tab's preview to a fraction of its scrollable height
    ScrollPreview { tab_id: TabId, fraction: f64 },
    /// Open the system print dialog for a tab's preview
    PrintPreview { tab_id: TabId, document_name: String },

    /// Persist the editor configuration
    SaveConfig(EditorConfig),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands, flattening away `None`s
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|cmd| !matches!(cmd, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // state changed alongside these, repaint to be safe
            _ => true,
        }
    }

    /// Iterate over this command and every command nested in batches
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}
