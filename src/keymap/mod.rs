//! Configurable keyboard mapping
//!
//! ```text
//! winit::KeyEvent → Keystroke → Keymap::handle_keystroke() → Command → Vec<Msg>
//! ```
//!
//! Bindings come from the embedded `keymap.yaml`, with the user's keymap
//! merged on top. `cmd` means Cmd on macOS and Ctrl elsewhere. Two-key
//! chords are supported.

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;
mod winit_adapter;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, default_keymap_yaml, load_default_keymap, merge_bindings};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
pub use winit_adapter::keystroke_from_winit;
