//! Keyboard and mouse input
//!
//! - `InputSnapshot` polls macroquad once per frame
//! - `InputAction` counts presses for a named game action
//! - `InputMap` binds keys, mouse buttons and the wheel to actions

mod action;
mod map;
mod snapshot;
pub mod keys;

pub use action::{ActionBehavior, ActionState, InputAction};
pub use map::{ActionId, InputMap};
pub use snapshot::InputSnapshot;
