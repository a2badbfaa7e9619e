use crate::gfx::{Graphics, HAlign};
use crate::math::snap_to_step;
use crate::rect::Rect;
use crate::ui::paint::{self, Arrow};
use crate::ui::{MouseState, Theme, UiContext, UiError, Widget, WidgetBase};
use super::auto_repeats;

/// Numeric field with +/- buttons; holding a button repeats
#[derive(Debug, Clone)]
pub struct Spinner {
    base: WidgetBase,
    value: f32,
    min: f32,
    max: f32,
    step: f32,
    decimals: usize,
    /// +1 or -1 while a button is held
    held: Option<f32>,
    hold_time: f32,
    changed: bool,
}

impl Spinner {
    pub fn new(bounds: Rect, min: f32, max: f32, value: f32, step: f32) -> Result<Self, UiError> {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut spinner = Self {
            base: WidgetBase::new(bounds)?,
            value: min,
            min,
            max,
            step: if step > 0.0 { step } else { 1.0 },
            decimals: 0,
            held: None,
            hold_time: 0.0,
            changed: false,
        };
        spinner.set_value(value);
        Ok(spinner)
    }

    /// Digits shown after the decimal point
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        if !value.is_nan() {
            self.value = snap_to_step(value, self.min, self.step).clamp(self.min, self.max);
        }
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn increment(&mut self) {
        self.set_value(self.value + self.step);
    }

    pub fn decrement(&mut self) {
        self.set_value(self.value - self.step);
    }

    pub fn display_text(&self) -> String {
        format!("{:.*}", self.decimals, self.value)
    }

    fn buttons_rect(&self) -> Rect {
        let b = self.base.bounds();
        b.slice_right((b.h * 0.9).min(b.w * 0.5))
    }

    pub fn up_rect(&self) -> Rect {
        let r = self.buttons_rect();
        Rect::new(r.x, r.y, r.w, r.h * 0.5)
    }

    pub fn down_rect(&self) -> Rect {
        let r = self.buttons_rect();
        Rect::new(r.x, r.y + r.h * 0.5, r.w, r.h * 0.5)
    }

    fn direction_at(&self, x: f32, y: f32) -> Option<f32> {
        if self.up_rect().contains(x, y) {
            Some(1.0)
        } else if self.down_rect().contains(x, y) {
            Some(-1.0)
        } else {
            None
        }
    }

    fn nudge(&mut self, direction: f32) {
        if direction > 0.0 { self.increment() } else { self.decrement() }
    }
}

impl Widget for Spinner {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let before = self.value;
        let state = self.base.hit_test(ctx);
        let (mx, my) = (ctx.input.mouse_x, ctx.input.mouse_y);

        match state {
            MouseState::Pressed => {
                self.held = self.direction_at(mx, my);
                self.hold_time = 0.0;
                if let Some(dir) = self.held {
                    self.nudge(dir);
                }
            }
            MouseState::Down => {
                if let Some(dir) = self.held.filter(|d| self.direction_at(mx, my) == Some(*d)) {
                    let previous = self.hold_time;
                    self.hold_time += ctx.dt;
                    for _ in 0..auto_repeats(previous, self.hold_time) {
                        self.nudge(dir);
                    }
                }
            }
            MouseState::Over | MouseState::Out => self.held = None,
        }

        if state.is_inside() && ctx.input.wheel != 0.0 {
            self.nudge(ctx.input.wheel.signum());
        }
        self.changed = self.value != before;
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        paint::frame(g, rect, theme.field, Some(theme.border), 0.0);
        let color = if self.base.is_enabled() { theme.text } else { theme.text_dim };

        let buttons = self.buttons_rect();
        let field = rect.pad_sides(theme.padding, 0.0, buttons.w + theme.padding, 0.0);
        paint::text(g, &self.display_text(), field, theme.font_size, color, HAlign::Right);

        for (r, dir, sign) in [(self.up_rect(), Arrow::Up, 1.0), (self.down_rect(), Arrow::Down, -1.0)] {
            let fill = if self.held == Some(sign) { theme.control_pressed } else { theme.control };
            paint::frame(g, r, fill, Some(theme.border), 0.0);
            paint::arrow(g, r, dir, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    // 100x20: buttons are the rightmost 18px, up on top
    fn spinner() -> Spinner {
        Spinner::new(Rect::new(0.0, 0.0, 100.0, 20.0), 0.0, 10.0, 5.0, 1.0).unwrap()
    }

    fn frame(ctx: &mut UiContext, input: InputSnapshot, dt: f32, s: &mut Spinner) {
        ctx.begin_frame(input, dt);
        s.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_buttons_step_and_clamp() {
        let mut ctx = UiContext::new();
        let mut s = spinner();
        frame(&mut ctx, InputSnapshot::at(95.0, 5.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.value(), 6.0);
        assert!(s.changed());
        frame(&mut ctx, InputSnapshot::at(95.0, 5.0).with_left_released(), 0.016, &mut s);
        frame(&mut ctx, InputSnapshot::at(95.0, 15.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.value(), 5.0);

        s.set_value(99.0);
        assert_eq!(s.value(), 10.0);
        s.increment();
        assert_eq!(s.value(), 10.0);
    }

    #[test]
    fn test_hold_repeats() {
        let mut ctx = UiContext::new();
        let mut s = Spinner::new(Rect::new(0.0, 0.0, 100.0, 20.0), 0.0, 100.0, 0.0, 1.0).unwrap();
        frame(&mut ctx, InputSnapshot::at(95.0, 5.0).with_left_pressed(), 0.0, &mut s);
        assert_eq!(s.value(), 1.0);
        frame(&mut ctx, InputSnapshot::at(95.0, 5.0).with_left_down(), 0.52, &mut s);
        // held past the delay: one repeat at 0.4s, then every 0.05s
        assert_eq!(s.value(), 4.0);
    }

    #[test]
    fn test_wheel_and_display() {
        let mut ctx = UiContext::new();
        let mut s = Spinner::new(Rect::new(0.0, 0.0, 100.0, 20.0), 0.0, 1.0, 0.5, 0.25).unwrap().with_decimals(2);
        frame(&mut ctx, InputSnapshot::at(20.0, 10.0).with_wheel(1.0), 0.016, &mut s);
        assert_eq!(s.display_text(), "0.75");
    }
}
