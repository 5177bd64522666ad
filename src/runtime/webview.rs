//! Webview manager for the Markdown preview
//!
//! Each tab owns one wry WebView created as a child of the main window.
//! Only the active tab's webview is visible; all of them share the
//! preview rect from the layout.

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use winit::window::Window;
use wry::{Rect, WebView, WebViewBuilder};

use markpane::layout;
use markpane::markdown::{preview_navigation, scroll_to_fraction_script, PreviewNavigation};
use markpane::messages::{Msg, PreviewMsg};
use markpane::model::TabId;

use super::MsgSender;

/// Manages one webview per tab
pub struct WebviewManager {
    webviews: HashMap<TabId, WebView>,
    visible: Option<TabId>,
}

impl WebviewManager {
    pub fn new() -> Self {
        Self {
            webviews: HashMap::new(),
            visible: None,
        }
    }

    /// Push rendered content to a tab's preview, creating the webview on
    /// first use. `full_reload` replaces the whole page; otherwise `html`
    /// is a content script evaluated in the existing page.
    pub fn render(
        &mut self,
        tab_id: TabId,
        window: &Rc<Window>,
        bounds: layout::Rect,
        html: &str,
        full_reload: bool,
        sender: &MsgSender,
    ) -> Result<()> {
        if let Some(webview) = self.webviews.get(&tab_id) {
            if full_reload {
                webview.load_html(html)?;
            } else {
                webview.evaluate_script(html)?;
            }
            return Ok(());
        }

        if !full_reload {
            return Err(anyhow!("content update for {} before its first page", tab_id));
        }

        let ipc_sender = sender.clone();
        let webview = WebViewBuilder::new()
            .with_html(html)
            .with_bounds(to_wry_rect(bounds, window.scale_factor(), window.inner_size().height))
            .with_transparent(false)
            .with_visible(self.visible == Some(tab_id))
            .with_ipc_handler(move |request| {
                ipc_sender.send(Msg::Preview(PreviewMsg::Message {
                    tab_id,
                    payload: request.body().clone(),
                }));
            })
            .with_navigation_handler(|url| match preview_navigation(&url) {
                PreviewNavigation::Allow => true,
                PreviewNavigation::OpenExternally => {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                    }
                    false
                }
                PreviewNavigation::Block => {
                    tracing::debug!("Blocked preview navigation to {}", url);
                    false
                }
            })
            .build_as_child(window)?;

        tracing::debug!("Created preview webview for {}", tab_id);
        self.webviews.insert(tab_id, webview);
        Ok(())
    }

    /// Scroll a tab's preview to a fraction of its scrollable height
    pub fn scroll_to_fraction(&self, tab_id: TabId, fraction: f64) {
        if let Some(webview) = self.webviews.get(&tab_id) {
            if let Err(e) = webview.evaluate_script(&scroll_to_fraction_script(fraction)) {
                tracing::debug!("Preview scroll failed for {}: {}", tab_id, e);
            }
        }
    }

    /// Open the system print dialog for a tab's preview. The page title is
    /// set first since print backends use it as the default PDF name.
    pub fn print(&self, tab_id: TabId, document_name: &str) -> Result<()> {
        let webview = self
            .webviews
            .get(&tab_id)
            .ok_or_else(|| anyhow!("Preview is not ready"))?;
        let title = serde_json::to_string(document_name)?;
        webview.evaluate_script(&format!("document.title = {};", title))?;
        webview.print()?;
        Ok(())
    }

    /// Show only the active tab's webview and fit every webview to `bounds`
    pub fn sync_layout(
        &mut self,
        active: Option<TabId>,
        bounds: layout::Rect,
        scale_factor: f64,
        window_height: u32,
    ) {
        let rect = to_wry_rect(bounds, scale_factor, window_height);
        for (id, webview) in &self.webviews {
            if let Err(e) = webview.set_bounds(rect) {
                tracing::debug!("Failed to resize preview {}: {}", id, e);
            }
            if self.visible != active {
                let _ = webview.set_visible(Some(*id) == active);
            }
        }
        self.visible = active;
    }

    /// Drop webviews whose tabs no longer exist
    pub fn retain(&mut self, open_tabs: &[TabId]) {
        self.webviews.retain(|id, _| open_tabs.contains(id));
    }
}

impl Default for WebviewManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a layout rect to wry's Rect with DPI and coordinate system conversion.
///
/// Layout coordinates are physical pixels with a top-left origin. wry expects
/// logical points, and on macOS the parent NSView has a bottom-left origin.
fn to_wry_rect(bounds: layout::Rect, scale_factor: f64, window_height_px: u32) -> Rect {
    use wry::dpi::{LogicalPosition, LogicalSize};

    let logical_x = bounds.x as f64 / scale_factor;
    let logical_w = bounds.width as f64 / scale_factor;
    let logical_h = bounds.height as f64 / scale_factor;
    let top_y = bounds.y as f64 / scale_factor;

    let logical_y = if cfg!(target_os = "macos") {
        window_height_px as f64 / scale_factor - (top_y + logical_h)
    } else {
        top_y
    };

    Rect {
        position: LogicalPosition::new(logical_x, logical_y).into(),
        size: LogicalSize::new(logical_w, logical_h).into(),
    }
}
