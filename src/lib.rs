//! quadkit: a small 2D engine on top of macroquad
//!
//! - `engine`: fixed-timestep game loop, configuration, logging setup
//! - `input`: per-frame input snapshot, key constants, input actions
//! - `gfx`: sketch-style drawing API (shapes, curves, text, images, camera)
//! - `tween`: easing curves and property tweens
//! - `ui`: retained widget toolkit with window chrome and dialogs

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod engine;
pub mod gfx;
pub mod input;
pub mod math;
mod rect;
pub mod tween;
pub mod ui;

pub use engine::{run, Engine, EngineConfig, Game};
pub use gfx::Graphics;
pub use rect::Rect;

/// Everything a typical game needs in one import
pub mod prelude {
    pub use crate::engine::{run, ConfigError, Engine, EngineConfig, Game};
    pub use crate::gfx::color::{gray, hex, rgb, rgba};
    pub use crate::gfx::{ArcMode, Camera, Graphics, HAlign, Image, ShapeKind, ShapeMode, SpriteSheet, VAlign};
    pub use crate::input::keys::*;
    pub use crate::input::{ActionBehavior, InputAction, InputMap, InputSnapshot};
    pub use crate::math::{constrain, dist, map_range, Random};
    pub use crate::tween::{Animator, Easing, MoveTo, Repeat, Sequence, Tween, TweenEvent, TweenState};
    pub use crate::ui::{Component, Theme, UiContext, Widget};
    pub use crate::Rect;
}
