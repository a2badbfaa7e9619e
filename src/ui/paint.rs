//! Drawing helpers shared by the widgets

use macroquad::prelude::Color;
use crate::gfx::{Graphics, HAlign, ShapeMode, VAlign};
use crate::rect::Rect;
use super::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Filled box with an optional 1px border
pub fn frame(g: &mut Graphics, rect: Rect, fill: Color, border: Option<Color>, radius: f32) {
    g.push_style();
    g.rect_mode(ShapeMode::Corner);
    g.fill(fill);
    match border {
        Some(b) => {
            g.stroke(b);
            g.stroke_weight(1.0);
        }
        None => g.no_stroke(),
    }
    g.rounded_rect(rect.x, rect.y, rect.w, rect.h, radius);
    g.pop_style();
}

/// Single line of text vertically centered on `rect`
pub fn text(g: &mut Graphics, s: &str, rect: Rect, size: f32, color: Color, align: HAlign) {
    g.push_style();
    g.fill(color);
    g.text_size(size);
    g.text_align(align, VAlign::Center);
    let x = match align {
        HAlign::Left => rect.x,
        HAlign::Center => rect.center_x(),
        HAlign::Right => rect.right(),
    };
    g.text(s, x, rect.center_y());
    g.pop_style();
}

pub fn text_width(g: &mut Graphics, s: &str, size: f32) -> f32 {
    g.push_style();
    g.text_size(size);
    let w = g.text_width(s);
    g.pop_style();
    w
}

pub fn arrow(g: &mut Graphics, rect: Rect, dir: Arrow, color: Color) {
    let (cx, cy) = (rect.center_x(), rect.center_y());
    let r = rect.w.min(rect.h) * 0.25;
    g.push_style();
    g.fill(color);
    g.no_stroke();
    match dir {
        Arrow::Up => g.triangle(cx - r, cy + r * 0.5, cx + r, cy + r * 0.5, cx, cy - r * 0.7),
        Arrow::Down => g.triangle(cx - r, cy - r * 0.5, cx + r, cy - r * 0.5, cx, cy + r * 0.7),
        Arrow::Left => g.triangle(cx + r * 0.5, cy - r, cx + r * 0.5, cy + r, cx - r * 0.7, cy),
        Arrow::Right => g.triangle(cx - r * 0.5, cy - r, cx - r * 0.5, cy + r, cx + r * 0.7, cy),
    }
    g.pop_style();
}

pub fn check_mark(g: &mut Graphics, rect: Rect, color: Color) {
    let inner = rect.pad(rect.w * 0.22);
    g.push_style();
    g.no_fill();
    g.stroke(color);
    g.stroke_weight(2.0);
    g.line(inner.x, inner.center_y(), inner.x + inner.w * 0.4, inner.bottom());
    g.line(inner.x + inner.w * 0.4, inner.bottom(), inner.right(), inner.y);
    g.pop_style();
}

pub fn cross(g: &mut Graphics, rect: Rect, color: Color) {
    let inner = rect.pad(rect.w * 0.3);
    g.push_style();
    g.stroke(color);
    g.stroke_weight(1.5);
    g.line(inner.x, inner.y, inner.right(), inner.bottom());
    g.line(inner.right(), inner.y, inner.x, inner.bottom());
    g.pop_style();
}

/// Where a tooltip of the given size goes: below-right of the pointer,
/// flipped to stay on screen
pub fn tooltip_rect(x: f32, y: f32, w: f32, h: f32, screen: Rect) -> Rect {
    let mut tx = x + 12.0;
    let mut ty = y + 18.0;
    if tx + w > screen.right() {
        tx = (x - w - 4.0).max(screen.x);
    }
    if ty + h > screen.bottom() {
        ty = (y - h - 4.0).max(screen.y);
    }
    Rect::new(tx, ty, w, h)
}

pub fn tooltip_box(g: &mut Graphics, theme: &Theme, s: &str, x: f32, y: f32, screen: Rect) {
    let size = theme.font_size_small;
    let w = text_width(g, s, size) + theme.padding * 2.0;
    let h = size + theme.padding * 2.0;
    let rect = tooltip_rect(x, y, w, h, screen);
    frame(g, rect, theme.tooltip, Some(theme.border), theme.corner_radius);
    text(g, s, rect.pad(theme.padding), size, theme.tooltip_text, HAlign::Left);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_stays_on_screen() {
        let screen = Rect::new(0.0, 0.0, 200.0, 100.0);
        let r = tooltip_rect(10.0, 10.0, 50.0, 20.0, screen);
        assert_eq!((r.x, r.y), (22.0, 28.0));

        let r = tooltip_rect(190.0, 90.0, 50.0, 20.0, screen);
        assert!(r.right() <= screen.right());
        assert!(r.bottom() <= screen.bottom());
    }
}
