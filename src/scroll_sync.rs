//! Proportional scroll synchronization between the editor and its preview
//!
//! Each direction converts a scroll position into a fraction of the
//! scrollable range and applies it on the other side. Two guards stop a
//! scroll caused by one side from being reported back as a user scroll of
//! the other:
//!
//! - `editor_scrolling` is held while an editor scroll is being forwarded
//! - `preview_scrolling` is held while a preview scroll is applied to the editor

use serde::Deserialize;

/// Vertical scroll state of a scrollable surface, all in the same unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub offset: f64,
    /// Total content height
    pub extent: f64,
    /// Visible height
    pub viewport: f64,
}

impl ScrollMetrics {
    /// Scrollable range, if the content is taller than the viewport
    pub fn scrollable(&self) -> Option<f64> {
        let range = self.extent - self.viewport;
        (range > 0.0).then_some(range)
    }

    /// Position within the scrollable range, `0.0..=1.0`
    pub fn fraction(&self) -> Option<f64> {
        let range = self.scrollable()?;
        let fraction = self.offset / range;
        fraction.is_finite().then(|| fraction.clamp(0.0, 1.0))
    }

    /// Offset that corresponds to `fraction` of the scrollable range
    pub fn offset_for(&self, fraction: f64) -> Option<f64> {
        let offset = fraction * self.scrollable().unwrap_or(0.0);
        offset.is_finite().then_some(offset)
    }
}

/// Per-tab sync state
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSync {
    pub enabled: bool,
    editor_scrolling: bool,
    preview_scrolling: bool,
    /// Last editor offset seen, used to detect vertical movement
    last_offset: f64,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScrollSync {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            editor_scrolling: false,
            preview_scrolling: false,
            last_offset: 0.0,
        }
    }

    pub fn is_editor_scrolling(&self) -> bool {
        self.editor_scrolling
    }

    pub fn is_preview_scrolling(&self) -> bool {
        self.preview_scrolling
    }

    /// Record an editor scroll and decide whether to forward it.
    ///
    /// The offset is always recorded, so a scroll applied on behalf of the
    /// preview is absorbed here instead of bouncing back. When this returns
    /// `Some`, `editor_scrolling` is held until [`ScrollSync::end_editor_scroll`].
    pub fn editor_scrolled(&mut self, metrics: ScrollMetrics) -> Option<f64> {
        let vertical_change = metrics.offset - self.last_offset;
        self.last_offset = metrics.offset;

        if !self.enabled || self.editor_scrolling || self.preview_scrolling {
            return None;
        }
        if vertical_change == 0.0 {
            return None;
        }
        let fraction = metrics.fraction()?;
        self.editor_scrolling = true;
        Some(fraction)
    }

    /// Record an offset that changed without a user scroll, such as a
    /// viewport clamp after a resize, so it is not mistaken for one later
    pub fn record_offset(&mut self, offset: f64) {
        self.last_offset = offset;
    }

    pub fn end_editor_scroll(&mut self) {
        self.editor_scrolling = false;
    }

    /// Try to take the preview guard; fails while disabled or mid editor scroll
    pub fn begin_preview_scroll(&mut self) -> bool {
        if !self.enabled || self.editor_scrolling {
            return false;
        }
        self.preview_scrolling = true;
        true
    }

    pub fn end_preview_scroll(&mut self) {
        self.preview_scrolling = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// Messages posted by the preview page through `window.ipc.postMessage`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewEvent {
    /// The preview was scrolled to `percent` (0..=1) of its scrollable height
    Scroll { percent: f64 },
}

impl PreviewEvent {
    /// Parse a raw IPC payload; anything unexpected yields `None`
    pub fn parse(payload: &str) -> Option<Self> {
        match serde_json::from_str::<PreviewEvent>(payload) {
            Ok(PreviewEvent::Scroll { percent }) if !percent.is_finite() => {
                tracing::debug!("Ignoring non-finite preview scroll: {}", percent);
                None
            }
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!("Ignoring preview message: {}", e);
                None
            }
        }
    }
}
