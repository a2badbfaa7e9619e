//! Per-frame input snapshot
//!
//! Polls macroquad once at the top of the frame. Everything downstream
//! (action map, widgets) reads the snapshot, so update code never touches
//! the host input API and can be driven directly from tests.

use macroquad::prelude::*;
use crate::Rect;

#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// Mouse movement since last frame
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub middle_down: bool,
    /// Just pressed this frame
    pub left_pressed: bool,
    /// Just released this frame
    pub left_released: bool,
    pub right_pressed: bool,
    pub right_released: bool,
    pub middle_pressed: bool,
    pub middle_released: bool,
    /// Scroll wheel delta, positive = up
    pub wheel: f32,
    pub chars: Vec<char>,
    pub keys_pressed: Vec<KeyCode>,
    pub keys_released: Vec<KeyCode>,
    pub keys_down: Vec<KeyCode>,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl InputSnapshot {
    /// Read the host input state. `previous` supplies last frame's mouse
    /// position for the movement delta.
    pub fn capture(previous: Option<&InputSnapshot>) -> Self {
        let (mouse_x, mouse_y) = mouse_position();
        let (mouse_dx, mouse_dy) = previous
            .map(|p| (mouse_x - p.mouse_x, mouse_y - p.mouse_y))
            .unwrap_or((0.0, 0.0));
        let (_, wheel_y) = mouse_wheel();

        let mut chars = Vec::new();
        while let Some(ch) = get_char_pressed() {
            chars.push(ch);
        }

        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let ctrl = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        let alt = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);

        Self {
            mouse_x,
            mouse_y,
            mouse_dx,
            mouse_dy,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            middle_down: is_mouse_button_down(MouseButton::Middle),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            right_released: is_mouse_button_released(MouseButton::Right),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
            middle_released: is_mouse_button_released(MouseButton::Middle),
            // Normalize: browsers report large deltas, desktops report notches
            wheel: wheel_y.signum() * wheel_y.abs().min(1.0),
            chars,
            keys_pressed: get_keys_pressed().into_iter().collect(),
            keys_released: get_keys_released().into_iter().collect(),
            keys_down: get_keys_down().into_iter().collect(),
            shift,
            ctrl,
            alt,
        }
    }

    /// Snapshot with only a mouse position, handy for tests and replays
    pub fn at(x: f32, y: f32) -> Self {
        Self { mouse_x: x, mouse_y: y, ..Default::default() }
    }

    pub fn mouse(&self) -> Vec2 {
        vec2(self.mouse_x, self.mouse_y)
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.mouse_x, self.mouse_y)
    }

    /// Check if mouse is held down inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && self.inside(rect)
    }

    /// Check if mouse just pressed inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && self.inside(rect)
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_down,
            MouseButton::Right => self.right_down,
            MouseButton::Middle => self.middle_down,
            _ => false,
        }
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_pressed,
            MouseButton::Right => self.right_pressed,
            MouseButton::Middle => self.middle_pressed,
            _ => false,
        }
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_released,
            MouseButton::Right => self.right_released,
            MouseButton::Middle => self.middle_released,
            _ => false,
        }
    }

    // Builders used by tests and scripted input

    pub fn with_left_pressed(mut self) -> Self {
        self.left_pressed = true;
        self.left_down = true;
        self
    }

    pub fn with_left_down(mut self) -> Self {
        self.left_down = true;
        self
    }

    pub fn with_left_released(mut self) -> Self {
        self.left_released = true;
        self.left_down = false;
        self
    }

    pub fn with_wheel(mut self, wheel: f32) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn with_key_pressed(mut self, key: KeyCode) -> Self {
        self.keys_pressed.push(key);
        if !self.keys_down.contains(&key) {
            self.keys_down.push(key);
        }
        self
    }

    pub fn with_key_released(mut self, key: KeyCode) -> Self {
        self.keys_released.push(key);
        self.keys_down.retain(|k| *k != key);
        self
    }

    pub fn with_chars(mut self, text: &str) -> Self {
        self.chars.extend(text.chars());
        self
    }
}
