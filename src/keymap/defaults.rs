//! Default keybindings
//!
//! The shipped bindings live in `keymap.yaml` at the crate root and are
//! embedded at compile time. A user keymap is merged on top.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::config_paths;

const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap, e.g. for writing a starter user file
pub fn default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Embedded defaults merged with the user's keymap file, if any
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}, using fallback", e);
            default_bindings()
        }
    };

    match config_paths::keymap_file() {
        Some(path) if path.exists() => merge_user_file(bindings, &path),
        _ => bindings,
    }
}

fn merge_user_file(bindings: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(bindings, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            bindings
        }
    }
}

/// Merge user bindings into base bindings
///
/// - same keystrokes: the user binding replaces the base one
/// - command `Unbound`: matching base bindings are removed
/// - otherwise the user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystrokes != user_binding.keystrokes);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystrokes == user_binding.keystrokes)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Minimal bindings used if the embedded keymap ever fails to parse
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let chars = [
        ('n', cmd, Command::NewTab),
        ('o', cmd, Command::OpenFile),
        ('s', cmd, Command::SaveFile),
        ('s', cmd_shift, Command::SaveFileAs),
        ('w', cmd, Command::CloseTab),
        ('b', cmd, Command::Bold),
        ('i', cmd, Command::Italic),
        ('k', cmd, Command::InsertLink),
        ('z', cmd, Command::Undo),
        ('z', cmd_shift, Command::Redo),
        ('c', cmd, Command::Copy),
        ('x', cmd, Command::Cut),
        ('v', cmd, Command::Paste),
        ('a', cmd, Command::SelectAll),
    ];
    let keys = [
        (KeyCode::Enter, none, Command::InsertNewline),
        (KeyCode::Tab, none, Command::InsertTab),
        (KeyCode::Backspace, none, Command::DeleteBackward),
        (KeyCode::Delete, none, Command::DeleteForward),
        (KeyCode::Up, none, Command::MoveCursorUp),
        (KeyCode::Down, none, Command::MoveCursorDown),
        (KeyCode::Left, none, Command::MoveCursorLeft),
        (KeyCode::Right, none, Command::MoveCursorRight),
        (KeyCode::Home, none, Command::MoveCursorLineStart),
        (KeyCode::End, none, Command::MoveCursorLineEnd),
        (KeyCode::PageUp, none, Command::PageUp),
        (KeyCode::PageDown, none, Command::PageDown),
    ];

    chars
        .into_iter()
        .map(|(c, mods, command)| Keybinding::new(Keystroke::char_with_mods(c, mods), command))
        .chain(
            keys.into_iter()
                .map(|(key, mods, command)| Keybinding::new(Keystroke::new(key, mods), command)),
        )
        .collect()
}
