//! 2D drawing API
//!
//! Sketch-style immediate drawing on top of macroquad:
//! - Style state (fill, stroke, modes) with push/pop
//! - Matrix stack (translate, rotate, scale, shear) and a 2D camera
//! - Shapes, bezier and Catmull-Rom curves, text, images

mod camera;
mod graphics;
mod style;
pub mod color;
pub mod curves;
pub mod image;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use graphics::{wrap_text, Graphics, ShapeBuilder, ShapeKind};
pub use style::{ArcMode, HAlign, ShapeMode, StrokeCap, Style, VAlign};
pub use self::image::{Image, ImageError, PixelData, SpriteSheet};
pub use self::color::{gray, hex, hsb_to_rgb, rgb, rgb_to_hsb, rgba};
