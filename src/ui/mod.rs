//! Retained widget toolkit
//!
//! Widgets keep their own state and are driven once per frame:
//! - `update(&mut UiContext)` resolves the pointer and reacts to input
//! - `draw(&mut Graphics, &Theme)` renders with the current theme
//!
//! `UiContext` carries the frame's input plus the shared routing state
//! (hot widget, drag owner, keyboard focus, modal layer, tooltips).
//! Windows and panels own their children as `Component`s and move them
//! along when they move.

mod component;
mod context;
mod error;
mod mouse;
mod paint;
mod theme;
mod widget;
mod widgets;

pub use component::Component;
pub use context::{TooltipRequest, UiContext, WidgetId, TOOLTIP_DELAY};
pub use error::UiError;
pub use mouse::MouseState;
pub use paint::tooltip_rect;
pub use theme::{install_theme, theme, Theme};
pub use widget::{Widget, WidgetBase};
pub use widgets::*;
