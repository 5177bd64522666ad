//! UI state - status bar text, cursor blink and the close/quit flow

use std::time::{Duration, Instant};

use super::tab::TabId;

/// How long transient status messages stay visible
pub const TRANSIENT_MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// Status bar message that disappears on its own
#[derive(Debug, Clone)]
pub struct TransientMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    /// Fallback status text when no tab has a path to show
    pub status_message: String,
    pub transient_message: Option<TransientMessage>,
    /// Whether the cursor is currently visible (for blinking)
    pub cursor_visible: bool,
    pub last_cursor_blink: Instant,
    /// Tab whose close is waiting on a prompt answer or a save
    pub pending_close: Option<TabId>,
    /// A window close request is being worked through tab by tab
    pub quitting: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            status_message: String::new(),
            transient_message: None,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            pending_close: None,
            quitting: false,
        }
    }

    /// Reset cursor blink timer (call after user input)
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_blink = Instant::now();
    }

    /// Flip the caret if the interval has passed; true if a redraw is needed
    pub fn update_cursor_blink(&mut self, blink_interval: Duration) -> bool {
        if self.last_cursor_blink.elapsed() >= blink_interval {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_transient(&mut self, text: impl Into<String>) {
        self.transient_message = Some(TransientMessage::new(text, TRANSIENT_MESSAGE_DURATION));
    }

    /// Drop an expired transient message; true if one was removed
    pub fn expire_transient(&mut self) -> bool {
        if self
            .transient_message
            .as_ref()
            .is_some_and(TransientMessage::is_expired)
        {
            self.transient_message = None;
            return true;
        }
        false
    }

    /// Abandon any close or quit in progress
    pub fn cancel_close(&mut self) {
        self.pending_close = None;
        self.quitting = false;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
