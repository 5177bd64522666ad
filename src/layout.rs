//! Window layout and hit-testing
//!
//! One place computes where the toolbar, tab bar, editor, preview and status
//! bar go. The renderer, the mouse handling and the webview bounds all read
//! the same [`Layout`], so a click always lands where things were drawn.
//!
//! All coordinates are physical pixels with the origin at the top left.

use crate::keymap::Command;
use crate::model::{AppModel, Position, Tab, TabId};
use crate::util::text::visual_col_to_char_col;

/// Width of the line number gutter in characters
pub const GUTTER_CHARS: usize = 5;
/// Space between the gutter and the first text column
pub const TEXT_PADDING_PX: f32 = 8.0;
const TOOLBAR_PADDING_PX: f32 = 6.0;
const BUTTON_PADDING_PX: f32 = 8.0;
const BUTTON_GAP_PX: f32 = 4.0;
const GROUP_GAP_PX: f32 = 14.0;
const TAB_PADDING_PX: f32 = 10.0;
const TAB_MIN_WIDTH_PX: f32 = 90.0;
const TAB_MAX_WIDTH_PX: f32 = 240.0;
const STATUS_PADDING_PX: f32 = 8.0;
/// Wide enough for "Sync: off" so the segment does not jump when toggled
const SYNC_LABEL_CHARS: usize = 9;
const DIVIDER_PX: f32 = 1.0;

/// Toolbar contents in display order; `None` starts a new group
pub const TOOLBAR: &[Option<(Command, &str)>] = &[
    Some((Command::NewTab, "New")),
    Some((Command::OpenFile, "Open")),
    Some((Command::SaveFile, "Save")),
    Some((Command::SaveFileAs, "Save As")),
    None,
    Some((Command::Bold, "Bold")),
    Some((Command::Italic, "Italic")),
    Some((Command::Strikethrough, "Strike")),
    Some((Command::InlineCode, "Code")),
    Some((Command::ToggleBlockquote, "Quote")),
    Some((Command::InsertLink, "Link")),
    None,
    Some((Command::ExportPdf, "PDF")),
    Some((Command::ExportHtml, "HTML")),
    Some((Command::ToggleTheme, "Theme")),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarButton {
    pub command: Command,
    pub label: &'static str,
    pub rect: Rect,
}

/// A tab header and its close box
#[derive(Debug, Clone, PartialEq)]
pub struct TabHeader {
    pub id: TabId,
    pub title: String,
    pub rect: Rect,
    pub close: Rect,
}

/// What the mouse is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    ToolbarButton(Command),
    Tab(TabId),
    TabClose(TabId),
    /// Editor text, already resolved to a document position
    EditorText(Position),
    Gutter,
    Preview,
    SyncToggle,
    StatusBar,
    /// Toolbar or tab bar background
    Chrome,
    None,
}

/// Rects for every region of the window
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub window: Rect,
    pub toolbar: Rect,
    pub buttons: Vec<ToolbarButton>,
    pub tab_bar: Rect,
    /// Editor pane including the gutter
    pub editor: Rect,
    pub gutter: Rect,
    /// Where text glyphs are drawn
    pub text: Rect,
    /// Vertical line between editor and preview
    pub divider: Rect,
    pub preview: Rect,
    pub status_bar: Rect,
    /// Clickable "Sync: on|off" segment at the right end of the status bar
    pub sync_segment: Rect,
    pub line_height: f32,
    pub char_width: f32,
}

impl Layout {
    /// `preview_ratio` is the share of the content width given to the preview
    pub fn compute(
        window_width: u32,
        window_height: u32,
        line_height: usize,
        char_width: f32,
        preview_ratio: f32,
    ) -> Self {
        let width = window_width as f32;
        let height = window_height as f32;
        let lh = line_height.max(1) as f32;
        let cw = char_width.max(1.0);

        let window = Rect::new(0.0, 0.0, width, height);
        let toolbar = Rect::new(0.0, 0.0, width, lh + TOOLBAR_PADDING_PX * 2.0);
        let tab_bar = Rect::new(0.0, toolbar.bottom(), width, lh + TAB_PADDING_PX);
        let status_height = lh + STATUS_PADDING_PX / 2.0;
        let status_bar = Rect::new(0.0, height - status_height, width, status_height);

        let content_top = tab_bar.bottom();
        let content_height = status_bar.y - content_top;
        let ratio = preview_ratio.clamp(0.2, 0.8);
        let preview_width = (width * ratio).round();
        let editor_width = (width - preview_width - DIVIDER_PX).max(0.0);

        let editor = Rect::new(0.0, content_top, editor_width, content_height);
        let gutter = Rect::new(0.0, content_top, cw * GUTTER_CHARS as f32, content_height);
        let text_x = (gutter.right() + TEXT_PADDING_PX).round();
        let text = Rect::new(text_x, content_top, editor.right() - text_x, content_height);
        let divider = Rect::new(editor.right(), content_top, DIVIDER_PX, content_height);
        let preview = Rect::new(divider.right(), content_top, width - divider.right(), content_height);

        let sync_width = cw * SYNC_LABEL_CHARS as f32 + STATUS_PADDING_PX * 2.0;
        let sync_segment = Rect::new(width - sync_width, status_bar.y, sync_width, status_height);

        let buttons = toolbar_buttons(&toolbar, lh, cw);

        Self {
            window,
            toolbar,
            buttons,
            tab_bar,
            editor,
            gutter,
            text,
            divider,
            preview,
            status_bar,
            sync_segment,
            line_height: lh,
            char_width: cw,
        }
    }

    /// Layout for the model's current window, font metrics and config
    pub fn for_model(model: &AppModel) -> Self {
        Self::compute(
            model.window_size.0,
            model.window_size.1,
            model.line_height,
            model.char_width,
            model.config.preview_ratio,
        )
    }

    /// Whole lines that fit in the text area
    pub fn visible_lines(&self) -> usize {
        (self.text.height / self.line_height).floor().max(1.0) as usize
    }

    /// Whole columns that fit in the text area
    pub fn visible_columns(&self) -> usize {
        (self.text.width / self.char_width).floor().max(1.0) as usize
    }

    /// Tab header rects, left to right; headers past the window edge are dropped
    pub fn tab_headers(&self, tabs: &[Tab]) -> Vec<TabHeader> {
        let mut x = self.tab_bar.x;
        let mut headers = Vec::with_capacity(tabs.len());

        for tab in tabs {
            let title = tab.document.display_name();
            let text_width = title.chars().count() as f32 * self.char_width;
            let close_size = self.char_width * 2.0;
            let width = (text_width + close_size + TAB_PADDING_PX * 3.0)
                .clamp(TAB_MIN_WIDTH_PX, TAB_MAX_WIDTH_PX);
            if x >= self.tab_bar.right() {
                break;
            }

            let rect = Rect::new(x, self.tab_bar.y, width, self.tab_bar.height);
            let close = Rect::new(
                rect.right() - close_size - TAB_PADDING_PX / 2.0,
                rect.y + (rect.height - close_size) / 2.0,
                close_size,
                close_size,
            );
            headers.push(TabHeader {
                id: tab.id,
                title,
                rect,
                close,
            });
            x = rect.right() + 1.0;
        }

        headers
    }

    /// Document position under a point in the text area, clamped to the document
    pub fn position_at(&self, tab: &Tab, x: f32, y: f32) -> Position {
        let document = &tab.document;
        let viewport = &tab.editor.viewport;

        let row = ((y - self.text.y) / self.line_height).floor().max(0.0) as usize;
        let line = (viewport.top_line + row).min(document.line_count().saturating_sub(1));

        let visual = ((x - self.text.x) / self.char_width).round().max(0.0) as usize
            + viewport.left_column;
        let column = match document.line_text(line) {
            Some(text) => visual_col_to_char_col(&text, visual),
            None => 0,
        };

        Position::new(line, column.min(document.line_length(line)))
    }

    /// Find the element under a point
    pub fn hit_test(&self, model: &AppModel, x: f32, y: f32) -> HitTarget {
        if self.toolbar.contains(x, y) {
            return self
                .buttons
                .iter()
                .find(|b| b.rect.contains(x, y))
                .map_or(HitTarget::Chrome, |b| HitTarget::ToolbarButton(b.command));
        }

        if self.tab_bar.contains(x, y) {
            for header in self.tab_headers(&model.tabs.tabs) {
                if header.close.contains(x, y) {
                    return HitTarget::TabClose(header.id);
                }
                if header.rect.contains(x, y) {
                    return HitTarget::Tab(header.id);
                }
            }
            return HitTarget::Chrome;
        }

        if self.status_bar.contains(x, y) {
            if self.sync_segment.contains(x, y) && !model.tabs.is_empty() {
                return HitTarget::SyncToggle;
            }
            return HitTarget::StatusBar;
        }

        if self.preview.contains(x, y) {
            return HitTarget::Preview;
        }

        if self.editor.contains(x, y) {
            if x < self.text.x {
                return HitTarget::Gutter;
            }
            return match model.tabs.active() {
                Some(tab) => HitTarget::EditorText(self.position_at(tab, x, y)),
                None => HitTarget::None,
            };
        }

        HitTarget::None
    }
}

fn toolbar_buttons(toolbar: &Rect, line_height: f32, char_width: f32) -> Vec<ToolbarButton> {
    let mut buttons = Vec::with_capacity(TOOLBAR.len());
    let mut x = toolbar.x + TOOLBAR_PADDING_PX;
    let height = line_height + TOOLBAR_PADDING_PX;
    let y = toolbar.y + (toolbar.height - height) / 2.0;

    for entry in TOOLBAR {
        match entry {
            Some((command, label)) => {
                let width = label.chars().count() as f32 * char_width + BUTTON_PADDING_PX * 2.0;
                buttons.push(ToolbarButton {
                    command: *command,
                    label,
                    rect: Rect::new(x, y, width, height),
                });
                x += width + BUTTON_GAP_PX;
            }
            None => x += GROUP_GAP_PX,
        }
    }

    buttons
}
