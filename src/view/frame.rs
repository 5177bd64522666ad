//! Drawing primitives over the softbuffer pixel buffer
//!
//! All coordinates are physical pixels. Everything drawn is clipped to the
//! frame and, when set, to the clip rect, so callers can hand over rects
//! that hang off the edge of a pane.

use fontdue::Font;
use markpane::layout::Rect;

use super::GlyphCache;

/// Blend `fg` onto `bg` (both 0xAARRGGBB). The result is fully opaque.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let channel = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b * (1.0 - alpha) + f * alpha) as u32) << shift
    };
    0xFF000000 | channel(16) | channel(8) | channel(0)
}

/// Pixel span with exclusive end
#[derive(Clone, Copy, Debug)]
struct Span {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<Span>,
}

impl<'a> Frame<'a> {
    /// Wrap a pixel buffer. A buffer shorter than `width * height` shrinks
    /// the frame height to fit.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 {
            height.min(buffer.len() / width)
        } else {
            0
        };
        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Restrict drawing to `rect` until [`Frame::clear_clip`]
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = Some(self.span(rect, None));
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Intersect a rect with the frame and an optional clip
    fn span(&self, rect: Rect, clip: Option<Span>) -> Span {
        let to_px = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        let mut span = Span {
            x0: to_px(rect.x, self.width),
            y0: to_px(rect.y, self.height),
            x1: to_px(rect.right(), self.width),
            y1: to_px(rect.bottom(), self.height),
        };
        if let Some(c) = clip {
            span.x0 = span.x0.max(c.x0);
            span.y0 = span.y0.max(c.y0);
            span.x1 = span.x1.min(c.x1);
            span.y1 = span.y1.min(c.y1);
        }
        span
    }

    #[inline]
    fn in_clip(&self, x: usize, y: usize) -> bool {
        let within_frame = x < self.width && y < self.height;
        within_frame
            && self
                .clip
                .map_or(true, |c| x >= c.x0 && x < c.x1 && y >= c.y0 && y < c.y1)
    }

    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let s = self.span(rect, self.clip);
        for y in s.y0..s.y1 {
            let row = y * self.width;
            if s.x0 < s.x1 {
                self.buffer[row + s.x0..row + s.x1].fill(color);
            }
        }
    }

    /// Fill with the alpha in `color`'s high byte
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color);
        }

        let s = self.span(rect, self.clip);
        for y in s.y0..s.y1 {
            let row = y * self.width;
            for x in s.x0..s.x1 {
                self.buffer[row + x] = blend_colors(self.buffer[row + x], color, alpha);
            }
        }
    }

    /// One pixel border inside `rect`
    pub fn stroke_rect(&mut self, rect: Rect, color: u32) {
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, 1.0), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1.0, rect.width, 1.0), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1.0, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - 1.0, rect.y, 1.0, rect.height), color);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.in_clip(x, y) {
            self.buffer[y * self.width + x] = color;
        }
    }

    /// Returns 0 outside the frame
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend one pixel with a coverage value from 0.0 to 1.0
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        if alpha <= 0.0 || !self.in_clip(x, y) {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = if alpha >= 1.0 {
            color | 0xFF000000
        } else {
            blend_colors(self.buffer[idx], color, alpha)
        };
    }
}

/// Draws monospace text with a shared glyph cache
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
}

impl<'a> TextPainter<'a> {
    pub fn new(font: &'a Font, glyph_cache: &'a mut GlyphCache, font_size: f32, ascent: f32) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
        }
    }

    /// Draw `text` with its line box starting at (`x`, `y`). Returns the
    /// x coordinate after the last glyph.
    pub fn draw(&mut self, frame: &mut Frame, x: f32, y: f32, text: &str, color: u32) -> f32 {
        let mut pen_x = x;
        let baseline = y + self.ascent;

        for ch in text.chars() {
            let (metrics, bitmap) = self
                .glyph_cache
                .entry((ch, self.font_size.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_left = pen_x.round() as isize + metrics.xmin as isize;
            let glyph_top = (baseline - metrics.height as f32 - metrics.ymin as f32) as isize;

            for (i, &coverage) in bitmap.iter().enumerate() {
                if coverage == 0 {
                    continue;
                }
                let px = glyph_left + (i % metrics.width) as isize;
                let py = glyph_top + (i / metrics.width) as isize;
                if px >= 0 && py >= 0 {
                    frame.blend_pixel(px as usize, py as usize, color, coverage as f32 / 255.0);
                }
            }

            pen_x += metrics.advance_width;
        }

        pen_x
    }
}
