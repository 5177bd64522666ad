//! Keyboard input handling
//!
//! Keystrokes go through the keymap first. Keys the keymap does not bind
//! fall back to text input: the event's text is inserted unless a command
//! modifier (Ctrl, or Cmd on macOS) is held.

use winit::event::KeyEvent;
use winit::keyboard::ModifiersState;

use markpane::commands::Cmd;
use markpane::keymap::{keystroke_from_winit, Command, KeyAction, Keymap};
use markpane::messages::{DocumentMsg, Msg};
use markpane::model::AppModel;
use markpane::update::update;

/// Run every message a command maps to, collecting their side effects
pub fn dispatch_command(model: &mut AppModel, command: Command) -> Option<Cmd> {
    if command.needs_tab() && model.tabs.is_empty() {
        return None;
    }
    let cmds = command
        .to_msgs()
        .into_iter()
        .filter_map(|msg| update(model, msg))
        .collect();
    match Cmd::batch(cmds) {
        Cmd::None => None,
        cmd => Some(cmd),
    }
}

/// Handle a key press
pub fn handle_key(
    model: &mut AppModel,
    keymap: &mut Keymap,
    event: &KeyEvent,
    modifiers: ModifiersState,
) -> Option<Cmd> {
    let ctrl = modifiers.control_key();
    let shift = modifiers.shift_key();
    let alt = modifiers.alt_key();
    let logo = modifiers.super_key();

    if let Some(keystroke) = keystroke_from_winit(&event.logical_key, ctrl, shift, alt, logo) {
        match keymap.handle_keystroke(keystroke) {
            KeyAction::Execute(command) => return dispatch_command(model, command),
            // Chord in progress - swallow the key
            KeyAction::AwaitMore => return Some(Cmd::Redraw),
            KeyAction::NoMatch => {}
        }
    }

    if ctrl || logo {
        return None;
    }

    let text = event.text.as_ref()?;
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(ch), None) => update(model, Msg::Document(DocumentMsg::InsertChar(ch))),
        _ => update(model, Msg::Document(DocumentMsg::InsertText(text))),
    }
}
