//! UI update functions (status bar, cursor blink)

use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::UiMsg;
use crate::model::{AppModel, TransientMessage};

/// Caret blink interval
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Handle UI messages
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::SetStatus(message) => {
            model.ui.set_status(message);
            Some(Cmd::Redraw)
        }

        UiMsg::SetTransientMessage { text, duration_ms } => {
            model.ui.transient_message = Some(TransientMessage::new(
                text,
                Duration::from_millis(duration_ms),
            ));
            Some(Cmd::Redraw)
        }

        UiMsg::BlinkCursor => {
            let expired = model.ui.expire_transient();
            let blinked = model.ui.update_cursor_blink(CURSOR_BLINK_INTERVAL);
            (expired || blinked).then_some(Cmd::Redraw)
        }
    }
}
