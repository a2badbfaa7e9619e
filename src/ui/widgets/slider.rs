use crate::gfx::Graphics;
use crate::math::snap_to_step;
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

const THUMB: f32 = 12.0;

/// Value picker along a track: drag the thumb, click the track, or use the
/// wheel while hovering. Vertical sliders grow upward.
#[derive(Debug, Clone)]
pub struct Slider {
    base: WidgetBase,
    orientation: Orientation,
    min: f32,
    max: f32,
    /// Snap increment (0 = continuous)
    step: f32,
    value: f32,
    changed: bool,
}

impl Slider {
    pub fn new(bounds: Rect, min: f32, max: f32, value: f32) -> Result<Self, UiError> {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut slider = Self {
            base: WidgetBase::new(bounds)?,
            orientation: Orientation::Horizontal,
            min,
            max,
            step: 0.0,
            value: min,
            changed: false,
        };
        slider.set_value(value);
        Ok(slider)
    }

    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        let value = self.value;
        self.set_value(value);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Clamped to [min, max] and snapped to the step
    pub fn set_value(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        let snapped = snap_to_step(value, self.min, self.step);
        self.value = snapped.clamp(self.min, self.max);
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Position of the value in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max > self.min { (self.value - self.min) / (self.max - self.min) } else { 0.0 }
    }

    pub fn thumb_rect(&self) -> Rect {
        let b = self.base.bounds();
        let t = self.fraction();
        match self.orientation {
            Orientation::Horizontal => {
                let x = b.x + (b.w - THUMB).max(0.0) * t;
                Rect::new(x, b.y, THUMB.min(b.w), b.h)
            }
            Orientation::Vertical => {
                let y = b.bottom() - THUMB.min(b.h) - (b.h - THUMB).max(0.0) * t;
                Rect::new(b.x, y, b.w, THUMB.min(b.h))
            }
        }
    }

    fn value_at(&self, x: f32, y: f32) -> f32 {
        let b = self.base.bounds();
        let t = match self.orientation {
            Orientation::Horizontal => (x - b.x - THUMB * 0.5) / (b.w - THUMB).max(1.0),
            Orientation::Vertical => 1.0 - (y - b.y - THUMB * 0.5) / (b.h - THUMB).max(1.0),
        };
        self.min + t.clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn wheel_step(&self) -> f32 {
        if self.step > 0.0 { self.step } else { (self.max - self.min) / 100.0 }
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let before = self.value;
        let state = self.base.hit_test(ctx);
        let id = self.base.id();

        if state == crate::ui::MouseState::Pressed {
            ctx.start_drag(id);
        }
        if ctx.is_dragging(id) && self.base.is_active() {
            let v = self.value_at(ctx.input.mouse_x, ctx.input.mouse_y);
            self.set_value(v);
        } else if state.is_inside() && ctx.input.wheel != 0.0 {
            let v = self.value + ctx.input.wheel.signum() * self.wheel_step();
            self.set_value(v);
        }
        self.changed = self.value != before;
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let b = self.base.bounds();
        let track = match self.orientation {
            Orientation::Horizontal => Rect::new(b.x, b.center_y() - 2.0, b.w, 4.0),
            Orientation::Vertical => Rect::new(b.center_x() - 2.0, b.y, 4.0, b.h),
        };
        paint::frame(g, track, theme.track, None, 2.0);

        let thumb = self.thumb_rect();
        let filled = match self.orientation {
            Orientation::Horizontal => Rect::new(track.x, track.y, thumb.center_x() - track.x, track.h),
            Orientation::Vertical => Rect::new(track.x, thumb.center_y(), track.w, track.bottom() - thumb.center_y()),
        };
        let accent = if self.base.is_enabled() { theme.accent } else { theme.text_dim };
        if filled.has_positive_size() {
            paint::frame(g, filled, accent, None, 2.0);
        }
        paint::frame(g, thumb, theme.control_color(self.base.mouse_state()), Some(accent), 3.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    fn frame(ctx: &mut UiContext, input: InputSnapshot, s: &mut Slider) {
        ctx.begin_frame(input, 0.016);
        s.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_value_clamped_and_snapped() {
        let mut s = Slider::new(Rect::new(0.0, 0.0, 112.0, 16.0), 0.0, 10.0, 42.0).unwrap().with_step(0.5);
        assert_eq!(s.value(), 10.0);
        s.set_value(3.3);
        assert_eq!(s.value(), 3.5);
        s.set_value(-1.0);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let s = Slider::new(Rect::new(0.0, 0.0, 100.0, 16.0), 10.0, 0.0, 5.0).unwrap();
        assert_eq!(s.range(), (0.0, 10.0));
    }

    #[test]
    fn test_drag_follows_mouse_outside_bounds() {
        let mut ctx = UiContext::new();
        // 112 wide: usable track is 100px starting at x=6
        let mut s = Slider::new(Rect::new(0.0, 0.0, 112.0, 16.0), 0.0, 100.0, 0.0).unwrap();

        frame(&mut ctx, InputSnapshot::at(56.0, 8.0).with_left_pressed(), &mut s);
        assert!((s.value() - 50.0).abs() < 1e-3);
        assert!(s.changed());

        frame(&mut ctx, InputSnapshot::at(500.0, 300.0).with_left_down(), &mut s);
        assert_eq!(s.value(), 100.0);

        frame(&mut ctx, InputSnapshot::at(0.0, 8.0), &mut s);
        assert_eq!(s.value(), 100.0);
        assert!(!s.changed());
    }

    #[test]
    fn test_wheel_steps_when_hovered() {
        let mut ctx = UiContext::new();
        let mut s = Slider::new(Rect::new(0.0, 0.0, 100.0, 16.0), 0.0, 10.0, 5.0).unwrap().with_step(1.0);
        frame(&mut ctx, InputSnapshot::at(50.0, 8.0).with_wheel(1.0), &mut s);
        assert_eq!(s.value(), 6.0);
        frame(&mut ctx, InputSnapshot::at(500.0, 8.0).with_wheel(1.0), &mut s);
        assert_eq!(s.value(), 6.0);
    }

    #[test]
    fn test_vertical_grows_upward() {
        let mut ctx = UiContext::new();
        let mut s = Slider::new(Rect::new(0.0, 0.0, 16.0, 112.0), 0.0, 1.0, 0.0).unwrap().vertical();
        frame(&mut ctx, InputSnapshot::at(8.0, 6.0).with_left_pressed(), &mut s);
        assert_eq!(s.value(), 1.0);
        assert_eq!(s.thumb_rect().y, 0.0);
    }
}
