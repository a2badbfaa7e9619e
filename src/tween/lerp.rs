//! Interpolation between property values

use macroquad::prelude::{Color, Vec2};
use crate::Rect;

/// A value that can be blended toward another value.
///
/// `t` is eased progress and may leave 0..1 for overshooting curves, so
/// implementations must extrapolate rather than clamp.
pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t as f64
    }
}

impl Lerp for (f32, f32) {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        (self.0.lerp(&to.0, t), self.1.lerp(&to.1, t))
    }
}

impl Lerp for Vec2 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        *self + (*to - *self) * t
    }
}

impl Lerp for Color {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        // Channels are clamped since overshoot has no meaning for color
        Color::new(
            self.r.lerp(&to.r, t).clamp(0.0, 1.0),
            self.g.lerp(&to.g, t).clamp(0.0, 1.0),
            self.b.lerp(&to.b, t).clamp(0.0, 1.0),
            self.a.lerp(&to.a, t).clamp(0.0, 1.0),
        )
    }
}

impl Lerp for Rect {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        Rect::new(
            self.x.lerp(&to.x, t),
            self.y.lerp(&to.y, t),
            self.w.lerp(&to.w, t),
            self.h.lerp(&to.h, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_extrapolates() {
        assert_eq!(0.0f32.lerp(&10.0, 0.5), 5.0);
        assert_eq!(0.0f32.lerp(&10.0, 1.2), 12.0);
    }

    #[test]
    fn test_color_is_clamped() {
        let c = Color::new(0.0, 0.0, 0.0, 1.0).lerp(&Color::new(1.0, 1.0, 1.0, 1.0), 1.5);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_rect_blends_all_fields() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(5.0, 10.0, 20.0, 30.0));
    }
}
