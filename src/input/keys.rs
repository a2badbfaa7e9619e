//! Key and mouse button constants
//!
//! Short upper-case names the way sketching engines expose them, backed by
//! macroquad's key codes. Names are also parsed from config files.

pub use macroquad::prelude::{KeyCode, MouseButton};

pub const UP: KeyCode = KeyCode::Up;
pub const DOWN: KeyCode = KeyCode::Down;
pub const LEFT: KeyCode = KeyCode::Left;
pub const RIGHT: KeyCode = KeyCode::Right;
pub const SPACE: KeyCode = KeyCode::Space;
pub const ENTER: KeyCode = KeyCode::Enter;
pub const RETURN: KeyCode = KeyCode::Enter;
pub const ESCAPE: KeyCode = KeyCode::Escape;
pub const TAB: KeyCode = KeyCode::Tab;
pub const BACKSPACE: KeyCode = KeyCode::Backspace;
pub const DELETE: KeyCode = KeyCode::Delete;
pub const HOME: KeyCode = KeyCode::Home;
pub const END: KeyCode = KeyCode::End;
pub const PAGE_UP: KeyCode = KeyCode::PageUp;
pub const PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const SHIFT: KeyCode = KeyCode::LeftShift;
pub const CONTROL: KeyCode = KeyCode::LeftControl;
pub const ALT: KeyCode = KeyCode::LeftAlt;

pub const MOUSE_LEFT: MouseButton = MouseButton::Left;
pub const MOUSE_RIGHT: MouseButton = MouseButton::Right;
pub const MOUSE_CENTER: MouseButton = MouseButton::Middle;

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("space", KeyCode::Space),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("escape", KeyCode::Escape),
    ("esc", KeyCode::Escape),
    ("tab", KeyCode::Tab),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("page_up", KeyCode::PageUp),
    ("page_down", KeyCode::PageDown),
    ("shift", KeyCode::LeftShift),
    ("right_shift", KeyCode::RightShift),
    ("control", KeyCode::LeftControl),
    ("ctrl", KeyCode::LeftControl),
    ("right_control", KeyCode::RightControl),
    ("alt", KeyCode::LeftAlt),
    ("right_alt", KeyCode::RightAlt),
    ("minus", KeyCode::Minus),
    ("equal", KeyCode::Equal),
    ("comma", KeyCode::Comma),
    ("period", KeyCode::Period),
    ("slash", KeyCode::Slash),
    ("f1", KeyCode::F1),
    ("f2", KeyCode::F2),
    ("f3", KeyCode::F3),
    ("f4", KeyCode::F4),
    ("f5", KeyCode::F5),
    ("f6", KeyCode::F6),
    ("f7", KeyCode::F7),
    ("f8", KeyCode::F8),
    ("f9", KeyCode::F9),
    ("f10", KeyCode::F10),
    ("f11", KeyCode::F11),
    ("f12", KeyCode::F12),
];

const LETTERS: [KeyCode; 26] = [
    KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F, KeyCode::G,
    KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N,
    KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T, KeyCode::U,
    KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y, KeyCode::Z,
];

const DIGITS: [KeyCode; 10] = [
    KeyCode::Key0, KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4,
    KeyCode::Key5, KeyCode::Key6, KeyCode::Key7, KeyCode::Key8, KeyCode::Key9,
];

/// Parse a key name such as `"space"`, `"a"`, `"7"` or `"page_up"`
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_lowercase() {
            return Some(LETTERS[(c as u8 - b'a') as usize]);
        }
        if c.is_ascii_digit() {
            return Some(DIGITS[(c as u8 - b'0') as usize]);
        }
    }
    NAMED_KEYS.iter().find(|(n, _)| *n == name).map(|(_, k)| *k)
}

/// Canonical name for a key, if it has one
pub fn key_name(key: KeyCode) -> Option<String> {
    if let Some(i) = LETTERS.iter().position(|k| *k == key) {
        return Some(((b'a' + i as u8) as char).to_string());
    }
    if let Some(i) = DIGITS.iter().position(|k| *k == key) {
        return Some(((b'0' + i as u8) as char).to_string());
    }
    NAMED_KEYS.iter().find(|(_, k)| *k == key).map(|(n, _)| n.to_string())
}

pub fn mouse_button_from_name(name: &str) -> Option<MouseButton> {
    match name.trim().to_ascii_lowercase().as_str() {
        "mouse_left" | "left_button" => Some(MouseButton::Left),
        "mouse_right" | "right_button" => Some(MouseButton::Right),
        "mouse_center" | "mouse_middle" | "middle_button" => Some(MouseButton::Middle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(key_from_name("W"), Some(KeyCode::W));
        assert_eq!(key_from_name("7"), Some(KeyCode::Key7));
        assert_eq!(key_name(KeyCode::Q).as_deref(), Some("q"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_from_name(" Space "), Some(KeyCode::Space));
        assert_eq!(key_from_name("esc"), Some(KeyCode::Escape));
        assert_eq!(key_name(KeyCode::Escape).as_deref(), Some("escape"));
        assert_eq!(key_from_name("hyper"), None);
    }

    #[test]
    fn test_mouse_names() {
        assert_eq!(mouse_button_from_name("MOUSE_LEFT"), Some(MOUSE_LEFT));
        assert_eq!(mouse_button_from_name("mouse_center"), Some(MOUSE_CENTER));
        assert_eq!(mouse_button_from_name("left"), None);
    }
}
