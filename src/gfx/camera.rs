//! 2D camera: pan, zoom and rotate the world under the viewport

use macroquad::math::{Affine2, Vec2};
use crate::Rect;

pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the viewport center
    pub position: Vec2,
    pub zoom: f32,
    /// Radians, clockwise on screen
    pub rotation: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec2) -> Self {
        Self { position, ..Default::default() }
    }

    /// World -> screen transform for the given viewport
    pub fn transform(&self, viewport: Rect) -> Affine2 {
        let center = Vec2::new(viewport.center_x(), viewport.center_y());
        Affine2::from_translation(center)
            * Affine2::from_angle(self.rotation)
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(-self.position)
    }

    pub fn world_to_screen(&self, world: Vec2, viewport: Rect) -> Vec2 {
        self.transform(viewport).transform_point2(world)
    }

    pub fn screen_to_world(&self, screen: Vec2, viewport: Rect) -> Vec2 {
        self.transform(viewport).inverse().transform_point2(screen)
    }

    /// World-space rectangle covered by the viewport (axis-aligned bounds)
    pub fn visible_area(&self, viewport: Rect) -> Rect {
        let corners = [
            Vec2::new(viewport.x, viewport.y),
            Vec2::new(viewport.right(), viewport.y),
            Vec2::new(viewport.x, viewport.bottom()),
            Vec2::new(viewport.right(), viewport.bottom()),
        ]
        .map(|c| self.screen_to_world(c, viewport));
        let min = corners.iter().fold(Vec2::splat(f32::MAX), |m, c| m.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::MIN), |m, c| m.max(*c));
        Rect::from_corners(min.x, min.y, max.x, max.y)
    }

    /// Ease toward `target`; `smoothing` is roughly the inverse of the
    /// catch-up time in seconds. Frame-rate independent.
    pub fn follow(&mut self, target: Vec2, smoothing: f32, dt: f32) {
        let k = 1.0 - (-smoothing.max(0.0) * dt.max(0.0)).exp();
        self.position += (target - self.position) * k;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by `factor` keeping the world point under `screen_point` fixed
    pub fn zoom_at(&mut self, screen_point: Vec2, factor: f32, viewport: Rect) {
        let before = self.screen_to_world(screen_point, viewport);
        self.set_zoom(self.zoom * factor);
        let after = self.screen_to_world(screen_point, viewport);
        self.position += before - after;
    }

    /// Move by a screen-space drag delta
    pub fn pan_screen(&mut self, delta: Vec2) {
        let world_delta = Affine2::from_angle(-self.rotation).transform_vector2(delta) / self.zoom;
        self.position -= world_delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn near(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_position_maps_to_view_center() {
        let cam = Camera::new(Vec2::new(100.0, -50.0));
        assert!(near(cam.world_to_screen(Vec2::new(100.0, -50.0), VIEW), Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn test_round_trip_with_rotation_and_zoom() {
        let cam = Camera { position: Vec2::new(12.0, 34.0), zoom: 2.5, rotation: 0.7 };
        let p = Vec2::new(-40.0, 99.0);
        let back = cam.screen_to_world(cam.world_to_screen(p, VIEW), VIEW);
        assert!(near(p, back));
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut cam = Camera::default();
        let anchor = Vec2::new(700.0, 100.0);
        let world = cam.screen_to_world(anchor, VIEW);
        cam.zoom_at(anchor, 3.0, VIEW);
        assert!((cam.zoom - 3.0).abs() < 1e-5);
        assert!(near(cam.world_to_screen(world, VIEW), anchor));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.set_zoom(0.0);
        assert_eq!(cam.zoom, MIN_ZOOM);
        cam.set_zoom(1e9);
        assert_eq!(cam.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_follow_converges() {
        let mut cam = Camera::default();
        for _ in 0..600 {
            cam.follow(Vec2::new(100.0, 0.0), 5.0, 1.0 / 60.0);
        }
        assert!(near(cam.position, Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_pan_moves_opposite_to_drag() {
        let mut cam = Camera { zoom: 2.0, ..Default::default() };
        cam.pan_screen(Vec2::new(20.0, 0.0));
        assert!(near(cam.position, Vec2::new(-10.0, 0.0)));
    }
}
