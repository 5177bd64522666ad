//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::format::InlineStyle;
use crate::model::TabId;

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editor-specific messages (cursor movement, viewport scrolling)
#[derive(Debug, Clone)]
pub enum EditorMsg {
    // === Basic Movement ===
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to start of line (Home key)
    MoveCursorLineStart,
    /// Move cursor to end of line (End key)
    MoveCursorLineEnd,
    /// Move cursor to start of document (Ctrl+Home)
    MoveCursorDocumentStart,
    /// Move cursor to end of document (Ctrl+End)
    MoveCursorDocumentEnd,
    /// Move cursor by word (Option+Left/Right on Mac)
    MoveCursorWord(Direction),
    PageUp,
    PageDown,
    /// Set cursor to specific position (from mouse click)
    SetCursorPosition { line: usize, column: usize },
    /// Scroll viewport vertically in lines (positive = down)
    Scroll(i32),
    /// Scroll viewport horizontally in columns (positive = right)
    ScrollHorizontal(i32),

    // === Selection Movement (Shift+key) ===
    MoveCursorWithSelection(Direction),
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    MoveCursorWordWithSelection(Direction),
    PageUpWithSelection,
    PageDownWithSelection,

    // === Selection Commands ===
    /// Select all text (Cmd+A)
    SelectAll,
    /// Select the word at a position (double-click)
    SelectWordAt { line: usize, column: usize },
    /// Extend selection to position (Shift+Click, drag)
    ExtendSelectionToPosition { line: usize, column: usize },
    /// Collapse the selection onto the cursor
    ClearSelection,
}

/// Document-specific messages (text editing, undo/redo)
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    /// Insert a character at cursor, replacing the selection
    InsertChar(char),
    /// Insert a run of text (paste, IME commit), replacing the selection
    InsertText(String),
    InsertNewline,
    /// Insert spaces up to the next tab stop
    InsertTab,
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Delete word before cursor (Option+Backspace)
    DeleteWordBackward,
    /// Delete word after cursor (Option+Delete)
    DeleteWordForward,
    Undo,
    Redo,
    /// Copy selection (or the current line) to clipboard
    Copy,
    /// Cut selection (or the current line) to clipboard
    Cut,
    /// Paste from clipboard
    Paste,
}

/// Markdown formatting applied to the active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMsg {
    /// Wrap the selection in the style's markers
    Style(InlineStyle),
    /// Turn the selection into `[text](url)`
    InsertLink,
    /// Add or remove `> ` on the cursor line
    ToggleBlockquote,
}

/// Tab management messages
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// Create a new untitled tab and activate it
    NewTab,
    NextTab,
    PrevTab,
    ActivateTab(TabId),
    /// Close a specific tab, asking first if it has unsaved changes
    CloseTab(TabId),
    CloseActiveTab,
    /// Answer to the "save changes?" prompt for a tab
    CloseConfirmed { tab_id: TabId, choice: CloseChoice },
}

/// Answer to the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

/// Messages from the preview webview
#[derive(Debug, Clone)]
pub enum PreviewMsg {
    /// Raw `window.ipc.postMessage` payload from a tab's preview
    Message { tab_id: TabId, payload: String },
    /// Flip scroll sync for the active tab
    ToggleScrollSync,
    /// Pushing content to a tab's preview failed
    RenderFailed { tab_id: TabId },
}

/// Export messages (HTML file, PDF via print)
#[derive(Debug, Clone)]
pub enum ExportMsg {
    /// Ask for a destination and export the active tab as HTML
    ExportHtml,
    /// Export dialog returned a path (or None if cancelled)
    ExportHtmlDialogResult {
        tab_id: TabId,
        path: Option<PathBuf>,
    },
    /// HTML file write finished
    ExportCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },
    /// Print the active tab's preview (Save as PDF)
    ExportPdf,
}

/// UI-specific messages (status bar, cursor blink)
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Set the persistent status text
    SetStatus(String),
    /// Set a transient message that auto-expires
    SetTransientMessage { text: String, duration_ms: u64 },
    /// Toggle cursor blink state
    BlinkCursor,
}

/// Application-level messages (file operations, window events)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Window resized (physical pixels)
    Resize(u32, u32),

    /// User requested "Open File..." dialog
    OpenFileDialog,
    /// Open File dialog returned paths (empty if cancelled)
    OpenFileDialogResult { paths: Vec<PathBuf> },
    /// Open paths in new tabs (command line, drag-and-drop)
    OpenFiles(Vec<PathBuf>),
    /// File load completed (async result)
    FileLoaded {
        tab_id: TabId,
        result: Result<String, String>,
    },

    /// Save the active tab
    SaveFile,
    /// User requested "Save As..." dialog
    SaveFileAs,
    /// Save As dialog returned a path (or None if cancelled)
    SaveFileAsDialogResult {
        tab_id: TabId,
        path: Option<PathBuf>,
    },
    /// File save completed (async result)
    SaveCompleted {
        tab_id: TabId,
        path: PathBuf,
        revision: u64,
        result: Result<(), String>,
    },

    /// Switch between light and dark
    ToggleTheme,
    /// Window close requested
    QuitRequested,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Editor messages (cursor, viewport)
    Editor(EditorMsg),
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// Markdown formatting
    Format(FormatMsg),
    /// Tab messages
    Layout(LayoutMsg),
    /// Preview webview messages
    Preview(PreviewMsg),
    /// Export messages
    Export(ExportMsg),
    /// UI messages (status, animation)
    Ui(UiMsg),
    /// App messages (file I/O, window)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn move_cursor(direction: Direction) -> Self {
        Msg::Editor(EditorMsg::MoveCursor(direction))
    }

    pub fn insert_char(ch: char) -> Self {
        Msg::Document(DocumentMsg::InsertChar(ch))
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Msg::App(AppMsg::Resize(width, height))
    }

    pub fn style(style: InlineStyle) -> Self {
        Msg::Format(FormatMsg::Style(style))
    }
}
