//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the editor:
//! - `app` - ApplicationHandler, window management and side effects
//! - `input` - Keyboard event to message mapping
//! - `mouse` - Mouse event handling with hit-testing
//! - `webview` - Webview management for the Markdown preview

pub mod app;
pub mod input;
pub mod mouse;
pub mod webview;

use std::sync::mpsc::Sender;

use winit::event_loop::EventLoopProxy;

use markpane::messages::Msg;

pub use app::App;

/// Sends messages to the event loop from worker threads and webview
/// callbacks, waking the loop so they are processed promptly
#[derive(Clone)]
pub struct MsgSender {
    tx: Sender<Msg>,
    proxy: EventLoopProxy<()>,
}

impl MsgSender {
    pub fn new(tx: Sender<Msg>, proxy: EventLoopProxy<()>) -> Self {
        Self { tx, proxy }
    }

    pub fn send(&self, msg: Msg) {
        if self.tx.send(msg).is_ok() {
            // Fails only once the loop has exited
            let _ = self.proxy.send_event(());
        }
    }
}
