//! View module - software rendering of the editor chrome and text
//!
//! Everything except the preview is drawn into a back buffer with fontdue
//! glyphs and copied to the softbuffer surface. The preview rect is only
//! filled with its background; the tab's webview sits on top of it.

pub mod font;
pub mod frame;

pub use frame::{Frame, TextPainter};

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use fontdue::{Font, LineMetrics, Metrics};
use softbuffer::Surface;
use winit::window::Window;

use markpane::config::EditorConfig;
use markpane::layout::{Layout, Rect, TEXT_PADDING_PX};
use markpane::model::{AppModel, Tab};
use markpane::util::text::{char_col_to_visual_col, expand_tabs_for_display};

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

const CARET_WIDTH_PX: f32 = 2.0;
const GUTTER_RIGHT_PADDING_PX: f32 = 4.0;
const STATUS_PADDING_PX: f32 = 8.0;
const STATUS_GAP_CHARS: f32 = 3.0;

pub struct Renderer {
    font: Font,
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so drawing goes to this buffer and is copied on present
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    font_size: f32,
    line_metrics: LineMetrics,
    glyph_cache: GlyphCache,
    char_width: f32,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        config: &EditorConfig,
    ) -> Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        surface
            .resize(non_zero(width), non_zero(height))
            .map_err(|e| anyhow!("Failed to resize surface: {}", e))?;

        let font = font::load_font(config.font_path.as_deref())?;
        let font_size = config.font_size * window.scale_factor() as f32;
        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .ok_or_else(|| anyhow!("Font has no horizontal line metrics"))?;
        let (metrics, _) = font.rasterize('M', font_size);

        Ok(Self {
            font,
            surface,
            back_buffer: vec![0u32; width as usize * height as usize],
            width,
            height,
            font_size,
            line_metrics,
            glyph_cache: HashMap::new(),
            char_width: metrics.advance_width,
        })
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn line_height(&self) -> usize {
        self.line_metrics.new_line_size.ceil() as usize
    }

    fn resize_if_needed(&mut self, width: u32, height: u32) -> Result<()> {
        if self.width == width && self.height == height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize(width as usize * height as usize, 0);
        self.surface
            .resize(non_zero(width), non_zero(height))
            .map_err(|e| anyhow!("Failed to resize surface: {}", e))
    }

    pub fn render(&mut self, model: &AppModel) -> Result<()> {
        let (width, height) = model.window_size;
        if width == 0 || height == 0 {
            // minimized
            return Ok(());
        }
        self.resize_if_needed(width, height)?;

        let layout = model.layout();
        let line_height = self.line_height() as f32;
        {
            let mut frame = Frame::new(&mut self.back_buffer, width as usize, height as usize);
            let mut painter = TextPainter::new(
                &self.font,
                &mut self.glyph_cache,
                self.font_size,
                self.line_metrics.ascent,
            );
            let ctx = DrawContext {
                model,
                layout: &layout,
                line_height,
                char_width: self.char_width,
            };

            frame.clear(model.theme.editor.background.to_argb_u32());
            ctx.draw_toolbar(&mut frame, &mut painter);
            ctx.draw_tab_bar(&mut frame, &mut painter);
            if let Some(tab) = model.active_tab() {
                ctx.draw_gutter(&mut frame, &mut painter, tab);
                ctx.draw_text_area(&mut frame, &mut painter, tab);
            }
            ctx.draw_divider_and_preview(&mut frame);
            ctx.draw_status_bar(&mut frame, &mut painter);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;
        let len = buffer.len().min(self.back_buffer.len());
        buffer[..len].copy_from_slice(&self.back_buffer[..len]);
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Per-frame values shared by the draw passes
struct DrawContext<'a> {
    model: &'a AppModel,
    layout: &'a Layout,
    line_height: f32,
    char_width: f32,
}

impl DrawContext<'_> {
    /// Y offset that centers a line of text in `rect`
    fn text_y(&self, rect: &Rect) -> f32 {
        (rect.y + (rect.height - self.line_height) / 2.0).round()
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn draw_toolbar(&self, frame: &mut Frame, painter: &mut TextPainter) {
        let theme = &self.model.theme.toolbar;
        let fg = theme.foreground.to_argb_u32();
        let button_bg = theme.button_background.to_argb_u32();
        let border = theme.border.to_argb_u32();
        let toolbar = self.layout.toolbar;

        frame.fill_rect(toolbar, theme.background.to_argb_u32());
        frame.fill_rect(
            Rect::new(toolbar.x, toolbar.bottom() - 1.0, toolbar.width, 1.0),
            border,
        );

        for button in &self.layout.buttons {
            frame.fill_rect(button.rect, button_bg);
            frame.stroke_rect(button.rect, border);
            let x = button.rect.x + (button.rect.width - self.text_width(button.label)) / 2.0;
            painter.draw(frame, x, self.text_y(&button.rect), button.label, fg);
        }
    }

    fn draw_tab_bar(&self, frame: &mut Frame, painter: &mut TextPainter) {
        let theme = &self.model.theme.tab_bar;
        let tab_bar = self.layout.tab_bar;
        let border = theme.border.to_argb_u32();
        let active_id = self.model.tabs.active_id();

        frame.fill_rect(tab_bar, theme.background.to_argb_u32());
        frame.fill_rect(
            Rect::new(tab_bar.x, tab_bar.bottom() - 1.0, tab_bar.width, 1.0),
            border,
        );

        for header in self.layout.tab_headers(&self.model.tabs.tabs) {
            let active = Some(header.id) == active_id;
            let fg = if active {
                frame.fill_rect(header.rect, theme.active_background.to_argb_u32());
                theme.active_foreground.to_argb_u32()
            } else {
                theme.inactive_foreground.to_argb_u32()
            };
            frame.fill_rect(
                Rect::new(header.rect.right(), header.rect.y, 1.0, header.rect.height),
                border,
            );

            // Title is cut off at the close box
            frame.set_clip(Rect::new(
                header.rect.x,
                header.rect.y,
                header.close.x - header.rect.x,
                header.rect.height,
            ));
            painter.draw(
                frame,
                header.rect.x + TEXT_PADDING_PX,
                self.text_y(&header.rect),
                &header.title,
                fg,
            );
            frame.clear_clip();

            let close_x = header.close.x + (header.close.width - self.char_width) / 2.0;
            painter.draw(frame, close_x, self.text_y(&header.close), "×", fg);
        }
    }

    fn draw_gutter(&self, frame: &mut Frame, painter: &mut TextPainter, tab: &Tab) {
        let theme = &self.model.theme.gutter;
        let gutter = self.layout.gutter;
        let fg = theme.foreground.to_argb_u32();
        let fg_active = theme.foreground_active.to_argb_u32();

        frame.fill_rect(gutter, theme.background.to_argb_u32());
        frame.set_clip(gutter);

        let top = tab.editor.viewport.top_line;
        let end = (top + self.layout.visible_lines() + 1).min(tab.document.line_count());
        for (row, line) in (top..end).enumerate() {
            let number = (line + 1).to_string();
            let x = gutter.right() - GUTTER_RIGHT_PADDING_PX - self.text_width(&number);
            let y = gutter.y + row as f32 * self.line_height;
            let color = if line == tab.editor.cursor.line {
                fg_active
            } else {
                fg
            };
            painter.draw(frame, x.round(), y, &number, color);
        }

        frame.clear_clip();
        frame.fill_rect(
            Rect::new(gutter.right() - 1.0, gutter.y, 1.0, gutter.height),
            theme.border_color.to_argb_u32(),
        );
    }

    fn draw_text_area(&self, frame: &mut Frame, painter: &mut TextPainter, tab: &Tab) {
        let theme = &self.model.theme.editor;
        let text_rect = self.layout.text;
        let editor = &tab.editor;
        let document = &tab.document;
        let viewport = &editor.viewport;
        let left = viewport.left_column;

        let selection_start = editor.selection.start();
        let selection_end = editor.selection.end();
        let has_selection = editor.has_selection();

        frame.set_clip(text_rect);

        let top = viewport.top_line;
        let end = (top + self.layout.visible_lines() + 1).min(document.line_count());
        for (row, line) in (top..end).enumerate() {
            let y = text_rect.y + row as f32 * self.line_height;
            let Some(text) = document.line_text(line) else {
                break;
            };
            let col_x = |visual: usize| text_rect.x + (visual as f32 - left as f32) * self.char_width;

            if line == editor.cursor.line && !has_selection {
                frame.fill_rect(
                    Rect::new(text_rect.x, y, text_rect.width, self.line_height),
                    theme.current_line_background.to_argb_u32(),
                );
            }

            if has_selection && line >= selection_start.line && line <= selection_end.line {
                let from = if line == selection_start.line {
                    char_col_to_visual_col(&text, selection_start.column)
                } else {
                    0
                };
                // Past the end of a fully selected line, show the newline as one cell
                let to = if line == selection_end.line {
                    char_col_to_visual_col(&text, selection_end.column)
                } else {
                    char_col_to_visual_col(&text, text.chars().count()) + 1
                };
                if to > from {
                    let x0 = col_x(from);
                    frame.fill_rect_blended(
                        Rect::new(x0, y, col_x(to) - x0, self.line_height),
                        theme.selection_background.to_argb_u32(),
                    );
                }
            }

            let display = expand_tabs_for_display(&text);
            let visible: String = display.chars().skip(left).collect();
            painter.draw(frame, text_rect.x, y, &visible, theme.foreground.to_argb_u32());

            if line == editor.cursor.line && self.model.ui.cursor_visible && !tab.loading {
                let visual = char_col_to_visual_col(&text, editor.cursor.column);
                if visual >= left {
                    frame.fill_rect(
                        Rect::new(col_x(visual), y, CARET_WIDTH_PX, self.line_height),
                        theme.cursor_color.to_argb_u32(),
                    );
                }
            }
        }

        frame.clear_clip();
    }

    fn draw_divider_and_preview(&self, frame: &mut Frame) {
        frame.fill_rect(
            self.layout.divider,
            self.model.theme.gutter.border_color.to_argb_u32(),
        );
        frame.fill_rect(
            self.layout.preview,
            self.model.theme.preview.background.to_argb_u32(),
        );
    }

    fn draw_status_bar(&self, frame: &mut Frame, painter: &mut TextPainter) {
        let theme = &self.model.theme.status_bar;
        let bar = self.layout.status_bar;
        let fg = theme.foreground.to_argb_u32();
        let y = self.text_y(&bar);

        frame.fill_rect(bar, theme.background.to_argb_u32());

        // Right side, drawn from the sync segment leftwards
        let mut segments: Vec<String> = Vec::new();
        if let Some(cursor) = self.model.cursor_label() {
            segments.push(cursor);
        }
        segments.push(self.model.word_count_label());
        let right = segments.join("   ");
        let right_x = self.layout.sync_segment.x
            - self.text_width(&right)
            - STATUS_GAP_CHARS * self.char_width;

        let sync = self.layout.sync_segment;
        painter.draw(
            frame,
            sync.x + STATUS_PADDING_PX,
            y,
            self.model.sync_label(),
            fg,
        );
        painter.draw(frame, right_x, y, &right, fg);

        frame.set_clip(Rect::new(bar.x, bar.y, (right_x - bar.x).max(0.0), bar.height));
        painter.draw(
            frame,
            bar.x + STATUS_PADDING_PX,
            y,
            &self.model.status_text(),
            fg,
        );
        frame.clear_clip();
    }
}
