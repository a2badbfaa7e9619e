//! Key and mouse bindings to named actions

use macroquad::prelude::{KeyCode, MouseButton};
use super::keys::{key_from_name, mouse_button_from_name};
use super::{ActionBehavior, InputAction, InputSnapshot};

/// Handle to an action registered in an `InputMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
    WheelUp,
    WheelDown,
}

#[derive(Debug, Default, Clone)]
pub struct InputMap {
    actions: Vec<InputAction>,
    bindings: Vec<(Binding, ActionId)>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(action name, input name)` pairs, e.g. `("jump", "space")`.
    /// Unknown input names are skipped with a warning.
    pub fn from_bindings(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (action, input) in pairs {
            let id = map.action_id(action).unwrap_or_else(|| map.add_action(InputAction::new(*action)));
            if let Some(key) = key_from_name(input) {
                map.bind_key(key, id);
            } else if let Some(button) = mouse_button_from_name(input) {
                map.bind_mouse(button, id);
            } else {
                match input.trim().to_ascii_lowercase().as_str() {
                    "wheel_up" => map.bindings.push((Binding::WheelUp, id)),
                    "wheel_down" => map.bindings.push((Binding::WheelDown, id)),
                    _ => tracing::warn!(action, input, "unknown input name in binding"),
                }
            }
        }
        map
    }

    pub fn add_action(&mut self, action: InputAction) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    pub fn add(&mut self, name: &str, behavior: ActionBehavior) -> ActionId {
        self.add_action(InputAction::with_behavior(name, behavior))
    }

    pub fn action_id(&self, name: &str) -> Option<ActionId> {
        self.actions.iter().position(|a| a.name() == name).map(ActionId)
    }

    pub fn action(&mut self, id: ActionId) -> &mut InputAction {
        &mut self.actions[id.0]
    }

    pub fn action_named(&mut self, name: &str) -> Option<&mut InputAction> {
        self.actions.iter_mut().find(|a| a.name() == name)
    }

    /// Bind a key; a key drives at most one action
    pub fn bind_key(&mut self, key: KeyCode, id: ActionId) {
        self.bindings.retain(|(b, _)| *b != Binding::Key(key));
        self.bindings.push((Binding::Key(key), id));
    }

    pub fn bind_mouse(&mut self, button: MouseButton, id: ActionId) {
        self.bindings.retain(|(b, _)| *b != Binding::Mouse(button));
        self.bindings.push((Binding::Mouse(button), id));
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.retain(|(b, _)| *b != Binding::Key(key));
    }

    /// Drop every binding that drives `id`
    pub fn unbind(&mut self, id: ActionId) {
        self.bindings.retain(|(_, a)| *a != id);
    }

    pub fn keys_for(&self, id: ActionId) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter_map(|(b, a)| match b {
                Binding::Key(k) if *a == id => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn reset_all(&mut self) {
        for a in &mut self.actions {
            a.reset();
        }
    }

    /// Route this frame's presses and releases to the bound actions
    pub fn apply(&mut self, input: &InputSnapshot) {
        for (binding, id) in &self.bindings {
            let action = &mut self.actions[id.0];
            match binding {
                Binding::Key(key) => {
                    if input.key_pressed(*key) {
                        action.press();
                    }
                    if input.key_released(*key) {
                        action.release();
                    }
                }
                Binding::Mouse(button) => {
                    if input.button_pressed(*button) {
                        action.press();
                    }
                    if input.button_released(*button) {
                        action.release();
                    }
                }
                Binding::WheelUp => {
                    if input.wheel > 0.0 {
                        action.tap();
                    }
                }
                Binding::WheelDown => {
                    if input.wheel < 0.0 {
                        action.tap();
                    }
                }
            }
        }
    }
}
