//! HSB color picker: saturation/brightness square, hue bar, alpha bar and
//! a preview strip

use macroquad::prelude::Color;
use crate::gfx::color::{hsb_to_rgb, rgb_to_hsb, to_hex};
use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, MouseState, Theme, UiContext, UiError, Widget, WidgetBase};

const PAD: f32 = 4.0;
const GAP: f32 = 6.0;
const BAR: f32 = 14.0;
const PREVIEW: f32 = 18.0;
/// Cells per side when drawing the gradient square
const SQUARE_CELLS: usize = 16;
const HUE_CELLS: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Square,
    Hue,
    Alpha,
}

#[derive(Debug, Clone)]
pub struct ColorPicker {
    base: WidgetBase,
    /// Degrees, 0..360
    hue: f32,
    saturation: f32,
    brightness: f32,
    alpha: f32,
    active: Option<Part>,
    changed: bool,
}

impl ColorPicker {
    pub fn new(bounds: Rect, color: Color) -> Result<Self, UiError> {
        let mut picker = Self {
            base: WidgetBase::new(bounds)?,
            hue: 0.0,
            saturation: 0.0,
            brightness: 0.0,
            alpha: 1.0,
            active: None,
            changed: false,
        };
        picker.set_color(color);
        Ok(picker)
    }

    pub fn color(&self) -> Color {
        hsb_to_rgb(self.hue, self.saturation, self.brightness, self.alpha)
    }

    /// Gray colors keep the current hue so dragging back out of gray does
    /// not jump to red
    pub fn set_color(&mut self, color: Color) {
        let (h, s, b) = rgb_to_hsb(color);
        if s > 0.0 {
            self.hue = h;
        }
        self.saturation = s;
        self.brightness = b;
        self.alpha = color.a.clamp(0.0, 1.0);
    }

    /// (hue degrees, saturation, brightness, alpha)
    pub fn hsba(&self) -> (f32, f32, f32, f32) {
        (self.hue, self.saturation, self.brightness, self.alpha)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    fn picker_area(&self) -> Rect {
        let inner = self.base.bounds().pad(PAD);
        Rect::new(inner.x, inner.y, inner.w, (inner.h - PREVIEW - PAD).max(0.0))
    }

    pub fn square_rect(&self) -> Rect {
        let area = self.picker_area();
        let size = area.h.min(area.w - (BAR + GAP) * 2.0).max(0.0);
        Rect::new(area.x, area.y, size, size)
    }

    pub fn hue_rect(&self) -> Rect {
        let sq = self.square_rect();
        Rect::new(sq.right() + GAP, sq.y, BAR, sq.h)
    }

    pub fn alpha_rect(&self) -> Rect {
        let hue = self.hue_rect();
        Rect::new(hue.right() + GAP, hue.y, BAR, hue.h)
    }

    pub fn preview_rect(&self) -> Rect {
        self.base.bounds().pad(PAD).slice_bottom(PREVIEW)
    }

    fn part_at(&self, x: f32, y: f32) -> Option<Part> {
        if self.square_rect().contains(x, y) {
            Some(Part::Square)
        } else if self.hue_rect().contains(x, y) {
            Some(Part::Hue)
        } else if self.alpha_rect().contains(x, y) {
            Some(Part::Alpha)
        } else {
            None
        }
    }

    fn drag_to(&mut self, part: Part, x: f32, y: f32) {
        let unit = |v: f32, start: f32, len: f32| if len > 0.0 { ((v - start) / len).clamp(0.0, 1.0) } else { 0.0 };
        match part {
            Part::Square => {
                let sq = self.square_rect();
                self.saturation = unit(x, sq.x, sq.w);
                self.brightness = 1.0 - unit(y, sq.y, sq.h);
            }
            Part::Hue => {
                let r = self.hue_rect();
                self.hue = unit(y, r.y, r.h) * 360.0;
            }
            Part::Alpha => {
                let r = self.alpha_rect();
                self.alpha = 1.0 - unit(y, r.y, r.h);
            }
        }
    }
}

impl Widget for ColorPicker {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let before = self.hsba();
        let state = self.base.hit_test(ctx);
        let id = self.base.id();
        let (mx, my) = (ctx.input.mouse_x, ctx.input.mouse_y);

        if state == MouseState::Pressed {
            self.active = self.part_at(mx, my);
            if self.active.is_some() {
                ctx.start_drag(id);
            }
        }
        if !ctx.is_dragging(id) {
            self.active = None;
        }
        if let Some(part) = self.active {
            self.drag_to(part, mx, my);
        }
        self.changed = self.hsba() != before;
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        paint::frame(g, self.base.bounds(), theme.panel, Some(theme.border), theme.corner_radius);

        // Saturation/brightness square as a grid of flat cells
        let sq = self.square_rect();
        let cell = sq.w / SQUARE_CELLS as f32;
        for row in 0..SQUARE_CELLS {
            for col in 0..SQUARE_CELLS {
                let s = (col as f32 + 0.5) / SQUARE_CELLS as f32;
                let b = 1.0 - (row as f32 + 0.5) / SQUARE_CELLS as f32;
                let r = Rect::new(sq.x + cell * col as f32, sq.y + cell * row as f32, cell + 0.5, cell + 0.5);
                paint::frame(g, r, hsb_to_rgb(self.hue, s, b, 1.0), None, 0.0);
            }
        }
        let marker_x = sq.x + self.saturation * sq.w;
        let marker_y = sq.y + (1.0 - self.brightness) * sq.h;
        g.push_style();
        g.no_fill();
        g.stroke(if self.brightness > 0.5 { Color::new(0.0, 0.0, 0.0, 1.0) } else { Color::new(1.0, 1.0, 1.0, 1.0) });
        g.stroke_weight(1.5);
        g.circle(marker_x, marker_y, 8.0);
        g.pop_style();

        let hue_rect = self.hue_rect();
        let slice = hue_rect.h / HUE_CELLS as f32;
        for i in 0..HUE_CELLS {
            let hue = (i as f32 + 0.5) / HUE_CELLS as f32 * 360.0;
            let r = Rect::new(hue_rect.x, hue_rect.y + slice * i as f32, hue_rect.w, slice + 0.5);
            paint::frame(g, r, hsb_to_rgb(hue, 1.0, 1.0, 1.0), None, 0.0);
        }

        let alpha_rect = self.alpha_rect();
        let opaque = hsb_to_rgb(self.hue, self.saturation, self.brightness, 1.0);
        let slice = alpha_rect.h / HUE_CELLS as f32;
        for i in 0..HUE_CELLS {
            let r = Rect::new(alpha_rect.x, alpha_rect.y + slice * i as f32, alpha_rect.w, slice + 0.5);
            // checker behind the translucent color
            let checker = if i % 2 == 0 { theme.control } else { theme.control_hover };
            paint::frame(g, r, checker, None, 0.0);
            let a = 1.0 - (i as f32 + 0.5) / HUE_CELLS as f32;
            paint::frame(g, r, Color::new(opaque.r, opaque.g, opaque.b, a), None, 0.0);
        }

        for (rect, t) in [(hue_rect, self.hue / 360.0), (alpha_rect, 1.0 - self.alpha)] {
            let y = rect.y + rect.h * t;
            let marker = Rect::new(rect.x - 2.0, y - 2.0, rect.w + 4.0, 4.0);
            paint::frame(g, marker, Color::new(0.0, 0.0, 0.0, 0.0), Some(theme.text), 1.0);
        }

        let preview = self.preview_rect();
        let swatch = Rect::new(preview.x, preview.y, preview.h * 2.0, preview.h);
        paint::frame(g, swatch, self.color(), Some(theme.border), 2.0);
        let label = preview.pad_sides(swatch.w + GAP, 0.0, 0.0, 0.0);
        paint::text(g, &to_hex(self.color()), label, theme.font_size_small, theme.text, HAlign::Left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    // 160x130: picker area is 152x100 from (4, 4); square 100px, hue at x=110, alpha at x=130
    fn picker() -> ColorPicker {
        ColorPicker::new(Rect::new(0.0, 0.0, 160.0, 130.0), Color::new(1.0, 0.0, 0.0, 1.0)).unwrap()
    }

    fn frame(ctx: &mut UiContext, input: InputSnapshot, p: &mut ColorPicker) {
        ctx.begin_frame(input, 0.016);
        p.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_layout() {
        let p = picker();
        assert_eq!(p.square_rect(), Rect::new(4.0, 4.0, 100.0, 100.0));
        assert_eq!(p.hue_rect().x, 110.0);
        assert_eq!(p.alpha_rect().x, 130.0);
        assert_eq!(p.preview_rect(), Rect::new(4.0, 108.0, 152.0, 18.0));
    }

    #[test]
    fn test_initial_color_round_trips() {
        let p = picker();
        let (h, s, b, a) = p.hsba();
        assert_eq!((h, s, b, a), (0.0, 1.0, 1.0, 1.0));
        assert_eq!(p.color(), Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_square_drag_sets_saturation_and_brightness() {
        let mut ctx = UiContext::new();
        let mut p = picker();
        frame(&mut ctx, InputSnapshot::at(4.0 + 50.0, 4.0 + 25.0).with_left_pressed(), &mut p);
        let (_, s, b, _) = p.hsba();
        assert!((s - 0.5).abs() < 1e-4);
        assert!((b - 0.75).abs() < 1e-4);
        assert!(p.changed());

        // dragging far outside clamps
        frame(&mut ctx, InputSnapshot::at(-100.0, 900.0).with_left_down(), &mut p);
        let (_, s, b, _) = p.hsba();
        assert_eq!((s, b), (0.0, 0.0));
    }

    #[test]
    fn test_hue_and_alpha_bars() {
        let mut ctx = UiContext::new();
        let mut p = picker();
        frame(&mut ctx, InputSnapshot::at(115.0, 4.0 + 50.0).with_left_pressed(), &mut p);
        assert!((p.hsba().0 - 180.0).abs() < 1e-3);
        frame(&mut ctx, InputSnapshot::at(115.0, 4.0 + 50.0).with_left_released(), &mut p);

        frame(&mut ctx, InputSnapshot::at(135.0, 4.0 + 75.0).with_left_pressed(), &mut p);
        assert!((p.hsba().3 - 0.25).abs() < 1e-4);
        assert!((p.color().a - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_gray_keeps_hue() {
        let mut p = picker();
        p.set_color(hsb_to_rgb(200.0, 1.0, 1.0, 1.0));
        p.set_color(Color::new(0.5, 0.5, 0.5, 1.0));
        assert!((p.hsba().0 - 200.0).abs() < 0.1);
        assert_eq!(p.hsba().1, 0.0);
    }
}
