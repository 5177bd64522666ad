//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    /// No binding matches this keystroke
    NoMatch,
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Single-keystroke bindings (indices into `bindings`); later entries win
    single_lookup: HashMap<Keystroke, usize>,
    /// Keystrokes that start a chord sequence
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    /// Keystrokes typed so far in an unfinished chord
    pending_chord: Vec<Keystroke>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let Some(&first_stroke) = binding.keystrokes.first() else {
            return;
        };
        let idx = self.bindings.len();

        if binding.is_chord() {
            self.chord_prefixes
                .entry(first_stroke)
                .or_default()
                .push(idx);
        } else {
            self.single_lookup.insert(first_stroke, idx);
        }

        self.bindings.push(binding);
    }

    /// Clear pending chord state
    pub fn reset(&mut self) {
        self.pending_chord.clear();
    }

    /// Handle a keystroke and return the action to take
    ///
    /// A keystroke that is both a single binding and a chord prefix runs the
    /// single binding.
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> KeyAction {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord();
        }

        if let Some(command) = self.lookup(&keystroke) {
            return KeyAction::Execute(command);
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return KeyAction::AwaitMore;
        }

        KeyAction::NoMatch
    }

    fn try_complete_chord(&mut self) -> KeyAction {
        let Some(indices) = self
            .pending_chord
            .first()
            .and_then(|first| self.chord_prefixes.get(first))
        else {
            self.reset();
            return KeyAction::NoMatch;
        };

        // last matching binding wins, like single keystrokes
        let exact = indices
            .iter()
            .rev()
            .map(|&idx| &self.bindings[idx])
            .find(|binding| binding.keystrokes == self.pending_chord)
            .map(|binding| binding.command);
        if let Some(command) = exact {
            self.reset();
            return KeyAction::Execute(command);
        }

        let pending = self.pending_chord.len();
        let could_match = indices.iter().any(|&idx| {
            let strokes = &self.bindings[idx].keystrokes;
            strokes.len() > pending && strokes[..pending] == self.pending_chord[..]
        });

        if could_match {
            KeyAction::AwaitMore
        } else {
            self.reset();
            KeyAction::NoMatch
        }
    }

    /// Look up a single keystroke without chord handling
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.single_lookup
            .get(keystroke)
            .map(|&idx| self.bindings[idx].command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get the keybinding for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending_chord.is_empty()
    }

    /// The pending chord keystrokes, for the status bar
    pub fn pending_chord_display(&self) -> Option<String> {
        if self.pending_chord.is_empty() {
            return None;
        }
        Some(
            self.pending_chord
                .iter()
                .map(|k| k.display_string())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    fn ctrl(c: char) -> Keystroke {
        Keystroke::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    #[test]
    fn test_single_binding_lookup() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl('s'), Command::SaveFile)]);

        assert_eq!(keymap.lookup(&ctrl('s')), Some(Command::SaveFile));
        assert_eq!(keymap.lookup(&ctrl('k')), None);
    }

    #[test]
    fn test_later_binding_overrides() {
        let mut keymap = Keymap::with_bindings(vec![
            Keybinding::new(ctrl('b'), Command::Bold),
            Keybinding::new(ctrl('b'), Command::Italic),
        ]);
        assert_eq!(
            keymap.handle_keystroke(ctrl('b')),
            KeyAction::Execute(Command::Italic)
        );
    }

    #[test]
    fn test_chord_completes() {
        let mut keymap = Keymap::with_bindings(vec![Keybinding::chord(
            vec![ctrl('k'), ctrl('q')],
            Command::ToggleBlockquote,
        )]);

        assert_eq!(keymap.handle_keystroke(ctrl('k')), KeyAction::AwaitMore);
        assert!(keymap.has_pending_chord());
        assert!(keymap.pending_chord_display().is_some());

        assert_eq!(
            keymap.handle_keystroke(ctrl('q')),
            KeyAction::Execute(Command::ToggleBlockquote)
        );
        assert!(!keymap.has_pending_chord());
    }

    #[test]
    fn test_chord_mismatch_resets() {
        let mut keymap = Keymap::with_bindings(vec![
            Keybinding::chord(vec![ctrl('k'), ctrl('q')], Command::ToggleBlockquote),
            Keybinding::new(ctrl('s'), Command::SaveFile),
        ]);

        assert_eq!(keymap.handle_keystroke(ctrl('k')), KeyAction::AwaitMore);
        assert_eq!(keymap.handle_keystroke(ctrl('s')), KeyAction::NoMatch);
        assert!(!keymap.has_pending_chord());
        assert_eq!(
            keymap.handle_keystroke(ctrl('s')),
            KeyAction::Execute(Command::SaveFile)
        );
    }

    #[test]
    fn test_single_binding_beats_chord_prefix() {
        let mut keymap = Keymap::with_bindings(vec![
            Keybinding::new(ctrl('k'), Command::InsertLink),
            Keybinding::chord(vec![ctrl('k'), ctrl('q')], Command::ToggleBlockquote),
        ]);
        assert_eq!(
            keymap.handle_keystroke(ctrl('k')),
            KeyAction::Execute(Command::InsertLink)
        );
    }
}
