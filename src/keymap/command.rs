//! Command enum representing all bindable editor actions
//!
//! Commands are the bridge between keybindings (and toolbar buttons) and
//! the message system. Each command maps to one or more `Msg` values.

use crate::format::InlineStyle;
use crate::messages::{
    AppMsg, Direction, DocumentMsg, EditorMsg, ExportMsg, FormatMsg, LayoutMsg, Msg, PreviewMsg,
};

/// All executable editor commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cursor Movement (no selection)
    // ========================================================================
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    PageUp,
    PageDown,

    // ========================================================================
    // Selection Movement (extend selection)
    // ========================================================================
    MoveCursorUpWithSelection,
    MoveCursorDownWithSelection,
    MoveCursorLeftWithSelection,
    MoveCursorRightWithSelection,
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    MoveCursorWordLeftWithSelection,
    MoveCursorWordRightWithSelection,
    PageUpWithSelection,
    PageDownWithSelection,
    SelectAll,
    ClearSelection,

    // ========================================================================
    // Editing
    // ========================================================================
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,

    // ========================================================================
    // Files & Tabs
    // ========================================================================
    NewTab,
    OpenFile,
    SaveFile,
    SaveFileAs,
    CloseTab,
    NextTab,
    PrevTab,

    // ========================================================================
    // Markdown Formatting
    // ========================================================================
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    InsertLink,
    ToggleBlockquote,

    // ========================================================================
    // View & Export
    // ========================================================================
    ExportHtml,
    ExportPdf,
    ToggleTheme,
    ToggleScrollSync,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Every command, in declaration order
    pub const ALL: &'static [Command] = &[
        Command::MoveCursorUp,
        Command::MoveCursorDown,
        Command::MoveCursorLeft,
        Command::MoveCursorRight,
        Command::MoveCursorLineStart,
        Command::MoveCursorLineEnd,
        Command::MoveCursorDocumentStart,
        Command::MoveCursorDocumentEnd,
        Command::MoveCursorWordLeft,
        Command::MoveCursorWordRight,
        Command::PageUp,
        Command::PageDown,
        Command::MoveCursorUpWithSelection,
        Command::MoveCursorDownWithSelection,
        Command::MoveCursorLeftWithSelection,
        Command::MoveCursorRightWithSelection,
        Command::MoveCursorLineStartWithSelection,
        Command::MoveCursorLineEndWithSelection,
        Command::MoveCursorDocumentStartWithSelection,
        Command::MoveCursorDocumentEndWithSelection,
        Command::MoveCursorWordLeftWithSelection,
        Command::MoveCursorWordRightWithSelection,
        Command::PageUpWithSelection,
        Command::PageDownWithSelection,
        Command::SelectAll,
        Command::ClearSelection,
        Command::InsertNewline,
        Command::InsertTab,
        Command::DeleteBackward,
        Command::DeleteForward,
        Command::DeleteWordBackward,
        Command::DeleteWordForward,
        Command::Undo,
        Command::Redo,
        Command::Copy,
        Command::Cut,
        Command::Paste,
        Command::NewTab,
        Command::OpenFile,
        Command::SaveFile,
        Command::SaveFileAs,
        Command::CloseTab,
        Command::NextTab,
        Command::PrevTab,
        Command::Bold,
        Command::Italic,
        Command::Strikethrough,
        Command::InlineCode,
        Command::InsertLink,
        Command::ToggleBlockquote,
        Command::ExportHtml,
        Command::ExportPdf,
        Command::ToggleTheme,
        Command::ToggleScrollSync,
        Command::Unbound,
    ];

    /// Convert this command to the messages it dispatches
    pub fn to_msgs(self) -> Vec<Msg> {
        use Command::*;

        let editor = |msg: EditorMsg| vec![Msg::Editor(msg)];
        let document = |msg: DocumentMsg| vec![Msg::Document(msg)];

        match self {
            MoveCursorUp => vec![Msg::move_cursor(Direction::Up)],
            MoveCursorDown => vec![Msg::move_cursor(Direction::Down)],
            MoveCursorLeft => vec![Msg::move_cursor(Direction::Left)],
            MoveCursorRight => vec![Msg::move_cursor(Direction::Right)],
            MoveCursorLineStart => editor(EditorMsg::MoveCursorLineStart),
            MoveCursorLineEnd => editor(EditorMsg::MoveCursorLineEnd),
            MoveCursorDocumentStart => editor(EditorMsg::MoveCursorDocumentStart),
            MoveCursorDocumentEnd => editor(EditorMsg::MoveCursorDocumentEnd),
            MoveCursorWordLeft => editor(EditorMsg::MoveCursorWord(Direction::Left)),
            MoveCursorWordRight => editor(EditorMsg::MoveCursorWord(Direction::Right)),
            PageUp => editor(EditorMsg::PageUp),
            PageDown => editor(EditorMsg::PageDown),

            MoveCursorUpWithSelection => editor(EditorMsg::MoveCursorWithSelection(Direction::Up)),
            MoveCursorDownWithSelection => {
                editor(EditorMsg::MoveCursorWithSelection(Direction::Down))
            }
            MoveCursorLeftWithSelection => {
                editor(EditorMsg::MoveCursorWithSelection(Direction::Left))
            }
            MoveCursorRightWithSelection => {
                editor(EditorMsg::MoveCursorWithSelection(Direction::Right))
            }
            MoveCursorLineStartWithSelection => editor(EditorMsg::MoveCursorLineStartWithSelection),
            MoveCursorLineEndWithSelection => editor(EditorMsg::MoveCursorLineEndWithSelection),
            MoveCursorDocumentStartWithSelection => {
                editor(EditorMsg::MoveCursorDocumentStartWithSelection)
            }
            MoveCursorDocumentEndWithSelection => {
                editor(EditorMsg::MoveCursorDocumentEndWithSelection)
            }
            MoveCursorWordLeftWithSelection => {
                editor(EditorMsg::MoveCursorWordWithSelection(Direction::Left))
            }
            MoveCursorWordRightWithSelection => {
                editor(EditorMsg::MoveCursorWordWithSelection(Direction::Right))
            }
            PageUpWithSelection => editor(EditorMsg::PageUpWithSelection),
            PageDownWithSelection => editor(EditorMsg::PageDownWithSelection),
            SelectAll => editor(EditorMsg::SelectAll),
            ClearSelection => editor(EditorMsg::ClearSelection),

            InsertNewline => document(DocumentMsg::InsertNewline),
            InsertTab => document(DocumentMsg::InsertTab),
            DeleteBackward => document(DocumentMsg::DeleteBackward),
            DeleteForward => document(DocumentMsg::DeleteForward),
            DeleteWordBackward => document(DocumentMsg::DeleteWordBackward),
            DeleteWordForward => document(DocumentMsg::DeleteWordForward),
            Undo => document(DocumentMsg::Undo),
            Redo => document(DocumentMsg::Redo),
            Copy => document(DocumentMsg::Copy),
            Cut => document(DocumentMsg::Cut),
            Paste => document(DocumentMsg::Paste),

            NewTab => vec![Msg::Layout(LayoutMsg::NewTab)],
            OpenFile => vec![Msg::App(AppMsg::OpenFileDialog)],
            SaveFile => vec![Msg::App(AppMsg::SaveFile)],
            SaveFileAs => vec![Msg::App(AppMsg::SaveFileAs)],
            CloseTab => vec![Msg::Layout(LayoutMsg::CloseActiveTab)],
            NextTab => vec![Msg::Layout(LayoutMsg::NextTab)],
            PrevTab => vec![Msg::Layout(LayoutMsg::PrevTab)],

            Bold => vec![Msg::style(InlineStyle::Bold)],
            Italic => vec![Msg::style(InlineStyle::Italic)],
            Strikethrough => vec![Msg::style(InlineStyle::Strikethrough)],
            InlineCode => vec![Msg::style(InlineStyle::Code)],
            InsertLink => vec![Msg::Format(FormatMsg::InsertLink)],
            ToggleBlockquote => vec![Msg::Format(FormatMsg::ToggleBlockquote)],

            ExportHtml => vec![Msg::Export(ExportMsg::ExportHtml)],
            ExportPdf => vec![Msg::Export(ExportMsg::ExportPdf)],
            ToggleTheme => vec![Msg::App(AppMsg::ToggleTheme)],
            ToggleScrollSync => vec![Msg::Preview(PreviewMsg::ToggleScrollSync)],

            Unbound => vec![],
        }
    }

    /// Identifier used in keymap YAML files
    pub fn name(self) -> &'static str {
        use Command::*;

        match self {
            MoveCursorUp => "MoveCursorUp",
            MoveCursorDown => "MoveCursorDown",
            MoveCursorLeft => "MoveCursorLeft",
            MoveCursorRight => "MoveCursorRight",
            MoveCursorLineStart => "MoveCursorLineStart",
            MoveCursorLineEnd => "MoveCursorLineEnd",
            MoveCursorDocumentStart => "MoveCursorDocumentStart",
            MoveCursorDocumentEnd => "MoveCursorDocumentEnd",
            MoveCursorWordLeft => "MoveCursorWordLeft",
            MoveCursorWordRight => "MoveCursorWordRight",
            PageUp => "PageUp",
            PageDown => "PageDown",
            MoveCursorUpWithSelection => "MoveCursorUpWithSelection",
            MoveCursorDownWithSelection => "MoveCursorDownWithSelection",
            MoveCursorLeftWithSelection => "MoveCursorLeftWithSelection",
            MoveCursorRightWithSelection => "MoveCursorRightWithSelection",
            MoveCursorLineStartWithSelection => "MoveCursorLineStartWithSelection",
            MoveCursorLineEndWithSelection => "MoveCursorLineEndWithSelection",
            MoveCursorDocumentStartWithSelection => "MoveCursorDocumentStartWithSelection",
            MoveCursorDocumentEndWithSelection => "MoveCursorDocumentEndWithSelection",
            MoveCursorWordLeftWithSelection => "MoveCursorWordLeftWithSelection",
            MoveCursorWordRightWithSelection => "MoveCursorWordRightWithSelection",
            PageUpWithSelection => "PageUpWithSelection",
            PageDownWithSelection => "PageDownWithSelection",
            SelectAll => "SelectAll",
            ClearSelection => "ClearSelection",
            InsertNewline => "InsertNewline",
            InsertTab => "InsertTab",
            DeleteBackward => "DeleteBackward",
            DeleteForward => "DeleteForward",
            DeleteWordBackward => "DeleteWordBackward",
            DeleteWordForward => "DeleteWordForward",
            Undo => "Undo",
            Redo => "Redo",
            Copy => "Copy",
            Cut => "Cut",
            Paste => "Paste",
            NewTab => "NewTab",
            OpenFile => "OpenFile",
            SaveFile => "SaveFile",
            SaveFileAs => "SaveFileAs",
            CloseTab => "CloseTab",
            NextTab => "NextTab",
            PrevTab => "PrevTab",
            Bold => "Bold",
            Italic => "Italic",
            Strikethrough => "Strikethrough",
            InlineCode => "InlineCode",
            InsertLink => "InsertLink",
            ToggleBlockquote => "ToggleBlockquote",
            ExportHtml => "ExportHtml",
            ExportPdf => "ExportPdf",
            ToggleTheme => "ToggleTheme",
            ToggleScrollSync => "ToggleScrollSync",
            Unbound => "Unbound",
        }
    }

    /// Human-readable label for toolbar tooltips
    pub fn display_name(self) -> &'static str {
        use Command::*;

        match self {
            NewTab => "New",
            OpenFile => "Open...",
            SaveFile => "Save",
            SaveFileAs => "Save As...",
            CloseTab => "Close Tab",
            NextTab => "Next Tab",
            PrevTab => "Previous Tab",
            Bold => "Bold",
            Italic => "Italic",
            Strikethrough => "Strikethrough",
            InlineCode => "Inline Code",
            InsertLink => "Insert Link",
            ToggleBlockquote => "Blockquote",
            ExportHtml => "Export HTML...",
            ExportPdf => "Export PDF...",
            ToggleTheme => "Toggle Theme",
            ToggleScrollSync => "Toggle Scroll Sync",
            Undo => "Undo",
            Redo => "Redo",
            Copy => "Copy",
            Cut => "Cut",
            Paste => "Paste",
            SelectAll => "Select All",
            other => other.name(),
        }
    }

    /// Commands that only make sense with an open tab
    pub fn needs_tab(self) -> bool {
        !matches!(
            self,
            Command::NewTab | Command::OpenFile | Command::ToggleTheme | Command::Unbound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_commands_have_unique_names() {
        let mut names: Vec<&str> = Command::ALL.iter().map(|c| c.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn formatting_commands_map_to_format_msgs() {
        assert!(matches!(
            Command::Strikethrough.to_msgs().as_slice(),
            [Msg::Format(FormatMsg::Style(InlineStyle::Strikethrough))]
        ));
        assert!(matches!(
            Command::ToggleBlockquote.to_msgs().as_slice(),
            [Msg::Format(FormatMsg::ToggleBlockquote)]
        ));
        assert!(Command::Unbound.to_msgs().is_empty());
    }

    #[test]
    fn close_tab_targets_active_tab() {
        assert!(matches!(
            Command::CloseTab.to_msgs().as_slice(),
            [Msg::Layout(LayoutMsg::CloseActiveTab)]
        ));
    }
}
