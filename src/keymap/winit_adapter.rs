//! Adapter to convert winit key events to our Keystroke type

use winit::keyboard::{Key, NamedKey};

use super::types::{KeyCode, Keystroke, Modifiers};

/// Convert winit key event data to a Keystroke
///
/// Returns None for keys the keymap cannot express (media keys, dead keys)
pub fn keystroke_from_winit(
    logical_key: &Key,
    ctrl: bool,
    shift: bool,
    alt: bool,
    logo: bool, // logo = meta = cmd on macOS
) -> Option<Keystroke> {
    let mods = Modifiers::new(ctrl, shift, alt, logo);

    let key = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Space => KeyCode::Space,

            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,

            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,

            NamedKey::F1 => KeyCode::F(1),
            NamedKey::F2 => KeyCode::F(2),
            NamedKey::F3 => KeyCode::F(3),
            NamedKey::F4 => KeyCode::F(4),
            NamedKey::F5 => KeyCode::F(5),
            NamedKey::F6 => KeyCode::F(6),
            NamedKey::F7 => KeyCode::F(7),
            NamedKey::F8 => KeyCode::F(8),
            NamedKey::F9 => KeyCode::F(9),
            NamedKey::F10 => KeyCode::F(10),
            NamedKey::F11 => KeyCode::F(11),
            NamedKey::F12 => KeyCode::F(12),

            _ => return None,
        },

        // Character keys - normalize to lowercase
        Key::Character(s) => KeyCode::Char(s.chars().next()?.to_ascii_lowercase()),

        _ => return None,
    };

    Some(Keystroke::new(key, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_key() {
        let stroke = keystroke_from_winit(&Key::Character("S".into()), true, true, false, false)
            .expect("should map");
        assert_eq!(stroke.key, KeyCode::Char('s'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_named_keys() {
        let stroke = keystroke_from_winit(
            &Key::Named(NamedKey::ArrowLeft),
            false,
            false,
            true,
            false,
        )
        .expect("should map");
        assert_eq!(stroke.key, KeyCode::Left);
        assert!(stroke.mods.alt());

        assert!(
            keystroke_from_winit(&Key::Named(NamedKey::AudioVolumeUp), false, false, false, false)
                .is_none()
        );
    }
}
