use crate::gfx::Graphics;
use crate::rect::Rect;
use crate::ui::paint::{self, Arrow};
use crate::ui::{MouseState, Theme, UiContext, UiError, Widget, WidgetBase};
use super::{auto_repeats, Orientation};

const MIN_THUMB: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Back,
    Forward,
    Thumb,
    TrackBefore,
    TrackAfter,
}

/// Scroll position over content larger than its viewport. The thumb length
/// is proportional to `visible / total`.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    base: WidgetBase,
    orientation: Orientation,
    total: f32,
    visible: f32,
    offset: f32,
    line_step: f32,
    wheel: bool,
    held: Option<Part>,
    hold_time: f32,
    grab: f32,
    changed: bool,
}

impl ScrollBar {
    pub fn new(bounds: Rect, orientation: Orientation, total: f32, visible: f32) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            orientation,
            total: total.max(0.0),
            visible: visible.max(0.0),
            offset: 0.0,
            line_step: 16.0,
            wheel: true,
            held: None,
            hold_time: 0.0,
            grab: 0.0,
            changed: false,
        })
    }

    pub fn with_line_step(mut self, step: f32) -> Self {
        self.set_line_step(step);
        self
    }

    pub fn set_line_step(&mut self, step: f32) {
        self.line_step = step.max(0.0);
    }

    /// Turn off wheel handling when a parent scrolls for us
    pub fn with_wheel(mut self, wheel: bool) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        (self.total - self.visible).max(0.0)
    }

    pub fn set_offset(&mut self, offset: f32) {
        if !offset.is_nan() {
            self.offset = offset.clamp(0.0, self.max_offset());
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.set_offset(self.offset + delta);
    }

    /// Content and viewport sizes; the offset is re-clamped
    pub fn set_extent(&mut self, total: f32, visible: f32) {
        self.total = total.max(0.0);
        self.visible = visible.max(0.0);
        let offset = self.offset;
        self.set_offset(offset);
    }

    /// Whether the content overflows the viewport
    pub fn is_needed(&self) -> bool {
        self.total > self.visible
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    fn arrow_size(&self) -> f32 {
        let b = self.base.bounds();
        match self.orientation {
            Orientation::Vertical => b.w.min(b.h / 3.0),
            Orientation::Horizontal => b.h.min(b.w / 3.0),
        }
    }

    pub fn back_arrow_rect(&self) -> Rect {
        let b = self.base.bounds();
        let s = self.arrow_size();
        match self.orientation {
            Orientation::Vertical => Rect::new(b.x, b.y, b.w, s),
            Orientation::Horizontal => Rect::new(b.x, b.y, s, b.h),
        }
    }

    pub fn forward_arrow_rect(&self) -> Rect {
        let b = self.base.bounds();
        let s = self.arrow_size();
        match self.orientation {
            Orientation::Vertical => Rect::new(b.x, b.bottom() - s, b.w, s),
            Orientation::Horizontal => Rect::new(b.right() - s, b.y, s, b.h),
        }
    }

    pub fn track_rect(&self) -> Rect {
        let b = self.base.bounds();
        let s = self.arrow_size();
        match self.orientation {
            Orientation::Vertical => Rect::new(b.x, b.y + s, b.w, (b.h - s * 2.0).max(0.0)),
            Orientation::Horizontal => Rect::new(b.x + s, b.y, (b.w - s * 2.0).max(0.0), b.h),
        }
    }

    /// (start, length) of the track along the scroll axis
    fn track_span(&self) -> (f32, f32) {
        let t = self.track_rect();
        match self.orientation {
            Orientation::Vertical => (t.y, t.h),
            Orientation::Horizontal => (t.x, t.w),
        }
    }

    fn thumb_span(&self) -> (f32, f32) {
        let (start, len) = self.track_span();
        let ratio = if self.total > 0.0 { (self.visible / self.total).min(1.0) } else { 1.0 };
        let thumb_len = (len * ratio).max(MIN_THUMB).min(len);
        let max = self.max_offset();
        let t = if max > 0.0 { self.offset / max } else { 0.0 };
        (start + (len - thumb_len) * t, thumb_len)
    }

    pub fn thumb_rect(&self) -> Rect {
        let t = self.track_rect();
        let (pos, len) = self.thumb_span();
        match self.orientation {
            Orientation::Vertical => Rect::new(t.x, pos, t.w, len),
            Orientation::Horizontal => Rect::new(pos, t.y, len, t.h),
        }
    }

    fn along(&self, x: f32, y: f32) -> f32 {
        match self.orientation {
            Orientation::Vertical => y,
            Orientation::Horizontal => x,
        }
    }

    fn part_at(&self, x: f32, y: f32) -> Option<Part> {
        if self.back_arrow_rect().contains(x, y) {
            return Some(Part::Back);
        }
        if self.forward_arrow_rect().contains(x, y) {
            return Some(Part::Forward);
        }
        if !self.track_rect().contains(x, y) {
            return None;
        }
        let (pos, len) = self.thumb_span();
        let a = self.along(x, y);
        Some(if a < pos {
            Part::TrackBefore
        } else if a >= pos + len {
            Part::TrackAfter
        } else {
            Part::Thumb
        })
    }

    fn apply_part(&mut self, part: Part) {
        match part {
            Part::Back => self.scroll_by(-self.line_step),
            Part::Forward => self.scroll_by(self.line_step),
            Part::TrackBefore => self.scroll_by(-self.visible),
            Part::TrackAfter => self.scroll_by(self.visible),
            Part::Thumb => {}
        }
    }
}

impl Widget for ScrollBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let before = self.offset;
        let state = self.base.hit_test(ctx);
        let id = self.base.id();
        let (mx, my) = (ctx.input.mouse_x, ctx.input.mouse_y);

        if state == MouseState::Pressed {
            self.held = self.part_at(mx, my);
            self.hold_time = 0.0;
            match self.held {
                Some(Part::Thumb) => {
                    ctx.start_drag(id);
                    self.grab = self.along(mx, my) - self.thumb_span().0;
                }
                Some(part) => self.apply_part(part),
                None => {}
            }
        } else if !state.is_held() && !ctx.is_dragging(id) {
            self.held = None;
        }

        if ctx.is_dragging(id) && self.held == Some(Part::Thumb) {
            let (start, len) = self.track_span();
            let (_, thumb_len) = self.thumb_span();
            let room = len - thumb_len;
            if room > 0.0 {
                let t = (self.along(mx, my) - self.grab - start) / room;
                self.set_offset(t * self.max_offset());
            }
        } else if let Some(part) = self.held.filter(|_| state == MouseState::Down) {
            // Auto-repeat only while over the part that was pressed
            if self.part_at(mx, my) == Some(part) && part != Part::Thumb {
                let previous = self.hold_time;
                self.hold_time += ctx.dt;
                for _ in 0..auto_repeats(previous, self.hold_time) {
                    self.apply_part(part);
                }
            }
        }

        if self.wheel && state.is_inside() && ctx.input.wheel != 0.0 {
            self.scroll_by(-ctx.input.wheel.signum() * self.line_step * 3.0);
        }
        self.changed = self.offset != before;
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        paint::frame(g, self.base.bounds(), theme.track, None, 0.0);

        let (back, forward) = match self.orientation {
            Orientation::Vertical => (Arrow::Up, Arrow::Down),
            Orientation::Horizontal => (Arrow::Left, Arrow::Right),
        };
        let fg = if self.base.is_enabled() { theme.text } else { theme.text_dim };
        for (rect, dir, part) in [
            (self.back_arrow_rect(), back, Part::Back),
            (self.forward_arrow_rect(), forward, Part::Forward),
        ] {
            let fill = if self.held == Some(part) { theme.control_pressed } else { theme.control };
            paint::frame(g, rect, fill, None, 0.0);
            paint::arrow(g, rect, dir, fg);
        }

        if self.is_needed() {
            let thumb = self.thumb_rect().pad(1.0);
            let fill = if self.held == Some(Part::Thumb) { theme.accent } else { theme.control_hover };
            paint::frame(g, thumb, fill, None, 3.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    // vertical, 12x112: arrows are 12px, track is 88px from y=12
    fn bar() -> ScrollBar {
        ScrollBar::new(Rect::new(0.0, 0.0, 12.0, 112.0), Orientation::Vertical, 400.0, 100.0).unwrap()
    }

    fn frame(ctx: &mut UiContext, input: InputSnapshot, dt: f32, s: &mut ScrollBar) {
        ctx.begin_frame(input, dt);
        s.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_thumb_proportional_to_visible() {
        let s = bar();
        assert_eq!(s.track_rect(), Rect::new(0.0, 12.0, 12.0, 88.0));
        assert_eq!(s.thumb_rect().h, 22.0);
        assert_eq!(s.thumb_rect().y, 12.0);
    }

    #[test]
    fn test_offset_clamped() {
        let mut s = bar();
        s.scroll_by(1000.0);
        assert_eq!(s.offset(), 300.0);
        assert_eq!(s.thumb_rect().bottom(), 100.0);
        s.set_extent(200.0, 100.0);
        assert_eq!(s.offset(), 100.0);
    }

    #[test]
    fn test_arrows_and_paging() {
        let mut ctx = UiContext::new();
        let mut s = bar();
        frame(&mut ctx, InputSnapshot::at(6.0, 106.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.offset(), 16.0);
        assert!(s.changed());
        frame(&mut ctx, InputSnapshot::at(6.0, 106.0).with_left_released(), 0.016, &mut s);

        // track below the thumb pages by the visible size
        frame(&mut ctx, InputSnapshot::at(6.0, 90.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.offset(), 116.0);
        frame(&mut ctx, InputSnapshot::at(6.0, 90.0).with_left_released(), 0.016, &mut s);

        frame(&mut ctx, InputSnapshot::at(6.0, 6.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.offset(), 100.0);
    }

    #[test]
    fn test_held_arrow_repeats() {
        let mut ctx = UiContext::new();
        let mut s = bar();
        frame(&mut ctx, InputSnapshot::at(6.0, 106.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.offset(), 16.0);
        // 0.3s held: still inside the delay
        frame(&mut ctx, InputSnapshot::at(6.0, 106.0).with_left_down(), 0.3, &mut s);
        assert_eq!(s.offset(), 16.0);
        // crossing the delay then two intervals
        frame(&mut ctx, InputSnapshot::at(6.0, 106.0).with_left_down(), 0.2, &mut s);
        assert!(s.offset() > 16.0);
    }

    #[test]
    fn test_thumb_drag() {
        let mut ctx = UiContext::new();
        let mut s = bar();
        // grab the thumb 5px below its top
        frame(&mut ctx, InputSnapshot::at(6.0, 17.0).with_left_pressed(), 0.016, &mut s);
        assert_eq!(s.offset(), 0.0);
        // track room is 88 - 22 = 66px for 300 units
        frame(&mut ctx, InputSnapshot::at(40.0, 17.0 + 33.0).with_left_down(), 0.016, &mut s);
        assert!((s.offset() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_scrolls_three_lines() {
        let mut ctx = UiContext::new();
        let mut s = bar();
        frame(&mut ctx, InputSnapshot::at(6.0, 50.0).with_wheel(-1.0), 0.016, &mut s);
        assert_eq!(s.offset(), 48.0);

        let mut quiet = bar().with_wheel(false);
        frame(&mut ctx, InputSnapshot::at(6.0, 50.0).with_wheel(-1.0), 0.016, &mut quiet);
        assert_eq!(quiet.offset(), 0.0);
    }
}
