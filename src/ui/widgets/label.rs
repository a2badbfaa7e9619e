use macroquad::prelude::Color;
use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};

/// Static line of text
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    text: String,
    align: HAlign,
    color: Option<Color>,
    font_size: Option<f32>,
}

impl Label {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            text: text.into(),
            align: HAlign::Left,
            color: None,
            font_size: None,
        })
    }

    pub fn with_align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Override the theme text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn align(&self) -> HAlign {
        self.align
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        // Only for tooltips; labels don't react to clicks
        self.base.hit_test(ctx);
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let color = if self.base.is_enabled() {
            self.color.unwrap_or(theme.text)
        } else {
            theme.text_dim
        };
        let size = self.font_size.unwrap_or(theme.font_size);
        paint::text(g, &self.text, self.base.bounds(), size, color, self.align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::ui::MouseState;

    #[test]
    fn test_alignment_defaults_left() {
        let label = Label::new(Rect::new(0.0, 0.0, 120.0, 20.0), "Speed").unwrap();
        assert_eq!(label.align(), HAlign::Left);
        let centered = label.with_align(HAlign::Center);
        assert_eq!(centered.align(), HAlign::Center);
        assert_eq!(centered.text(), "Speed");
    }

    #[test]
    fn test_bounds_checked_and_moved() {
        assert!(Label::new(Rect::new(0.0, 0.0, 0.0, 20.0), "x").is_err());
        let mut label = Label::new(Rect::new(10.0, 10.0, 120.0, 20.0), "x").unwrap();
        assert!(label.set_bounds(Rect::new(0.0, 0.0, 50.0, -1.0)).is_err());
        assert_eq!(label.bounds(), Rect::new(10.0, 10.0, 120.0, 20.0));
        label.move_by(5.0, -5.0);
        assert_eq!(label.bounds(), Rect::new(15.0, 5.0, 120.0, 20.0));
    }

    #[test]
    fn test_hover_without_click() {
        let mut ctx = UiContext::new();
        let mut label = Label::new(Rect::new(0.0, 0.0, 120.0, 20.0), "x").unwrap();
        ctx.begin_frame(InputSnapshot::at(5.0, 5.0), 0.016);
        label.update(&mut ctx);
        assert_eq!(label.mouse_state(), MouseState::Over);
        label.set_visible(false);
        ctx.begin_frame(InputSnapshot::at(5.0, 5.0), 0.016);
        label.update(&mut ctx);
        assert_eq!(label.mouse_state(), MouseState::Out);
    }
}
