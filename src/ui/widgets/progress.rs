use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};

/// Fraction of `value` between `min` and `max`, always inside [0, 1].
/// An empty or inverted range reads as full once `value` reaches `max`.
pub fn progress_fraction(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    let t = if range > 0.0 {
        (value - min) / range
    } else if value >= max {
        1.0
    } else {
        0.0
    };
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[derive(Debug, Clone)]
pub struct ProgressBar {
    base: WidgetBase,
    value: f32,
    min: f32,
    max: f32,
    show_text: bool,
}

impl ProgressBar {
    pub fn new(bounds: Rect, min: f32, max: f32) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            value: min,
            min,
            max,
            show_text: true,
        })
    }

    pub fn with_text(mut self, show: bool) -> Self {
        self.show_text = show;
        self
    }

    /// Stored as given; only the percentage is clamped
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn set_range(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn percentage(&self) -> f32 {
        progress_fraction(self.value, self.min, self.max)
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.base.hit_test(ctx);
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        paint::frame(g, rect, theme.track, Some(theme.border), theme.corner_radius);
        let fill = Rect::new(rect.x, rect.y, rect.w * self.percentage(), rect.h).pad(1.0);
        if fill.has_positive_size() {
            let color = if self.base.is_enabled() { theme.accent } else { theme.text_dim };
            paint::frame(g, fill, color, None, theme.corner_radius);
        }
        if self.show_text {
            let label = format!("{}%", (self.percentage() * 100.0).round() as i32);
            paint::text(g, &label, rect, theme.font_size_small, theme.text, HAlign::Center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_clamped_for_any_input() {
        let cases = [
            (5.0, 0.0, 10.0, 0.5),
            (-50.0, 0.0, 10.0, 0.0),
            (500.0, 0.0, 10.0, 1.0),
            (5.0, 10.0, 0.0, 1.0),
            (-1.0, 10.0, 0.0, 0.0),
            (10.0, 10.0, 10.0, 1.0),
            (f32::NAN, 0.0, 1.0, 0.0),
            (f32::INFINITY, 0.0, 1.0, 1.0),
            (0.5, f32::NEG_INFINITY, f32::INFINITY, 0.0),
        ];
        for (value, min, max, expected) in cases {
            let p = progress_fraction(value, min, max);
            assert!((0.0..=1.0).contains(&p), "{value} in [{min}, {max}] gave {p}");
            assert_eq!(p, expected, "{value} in [{min}, {max}]");
        }
    }

    #[test]
    fn test_bar_keeps_raw_value() {
        let mut bar = ProgressBar::new(Rect::new(0.0, 0.0, 100.0, 10.0), 0.0, 200.0).unwrap();
        bar.set_value(250.0);
        assert_eq!(bar.value(), 250.0);
        assert_eq!(bar.percentage(), 1.0);
        bar.set_range(0.0, 500.0);
        assert_eq!(bar.percentage(), 0.5);
    }
}
