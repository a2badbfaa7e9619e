//! Per-frame mouse state of a widget

/// Where the pointer is relative to a widget this frame.
///
/// Recomputed from scratch every frame; nothing carries over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseState {
    #[default]
    Out,
    Over,
    /// Button went down inside this frame
    Pressed,
    /// Button held inside
    Down,
}

impl MouseState {
    pub fn resolve(inside: bool, button_down: bool, button_pressed: bool) -> Self {
        if !inside {
            MouseState::Out
        } else if button_pressed {
            MouseState::Pressed
        } else if button_down {
            MouseState::Down
        } else {
            MouseState::Over
        }
    }

    pub fn is_inside(self) -> bool {
        self != MouseState::Out
    }

    pub fn is_held(self) -> bool {
        matches!(self, MouseState::Pressed | MouseState::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        assert_eq!(MouseState::resolve(false, true, true), MouseState::Out);
        assert_eq!(MouseState::resolve(true, true, true), MouseState::Pressed);
        assert_eq!(MouseState::resolve(true, true, false), MouseState::Down);
        assert_eq!(MouseState::resolve(true, false, false), MouseState::Over);
    }

    #[test]
    fn test_held() {
        assert!(MouseState::Pressed.is_held());
        assert!(MouseState::Down.is_held());
        assert!(!MouseState::Over.is_held());
        assert!(!MouseState::Out.is_inside());
    }
}
