//! Tweening: animate a property from one value to another over time
//!
//! - `Easing` shapes progress (linear plus 30 Penner curves)
//! - `Tween` is the percentage-driven state machine
//! - `MoveTo` moves a point at constant speed until it reaches a target
//! - `Sequence` and `Animator` manage several tweens at once

mod easing;
mod lerp;
#[allow(clippy::module_inception)]
mod tween;
mod motion;
mod animator;

pub use easing::Easing;
pub use lerp::Lerp;
pub use tween::{Pace, Repeat, Tween, TweenEvent, TweenState};
pub use motion::MoveTo;
pub use animator::{Animator, Sequence};
