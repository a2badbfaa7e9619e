use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};

/// Push button; `clicked()` is true on the frame the button is released over it
#[derive(Debug, Clone)]
pub struct Button {
    base: WidgetBase,
    text: String,
}

impl Button {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Result<Self, UiError> {
        Ok(Self { base: WidgetBase::new(bounds)?, text: text.into() })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clicked(&self) -> bool {
        self.base.clicked()
    }
}

impl Widget for Button {
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
        draw_button_face(g, theme, &self.base, &self.text, false);
    }
}

/// Button that stays down until clicked again
#[derive(Debug, Clone)]
pub struct ToggleButton {
    base: WidgetBase,
    text: String,
    on: bool,
    changed: bool,
}

impl ToggleButton {
    pub fn new(bounds: Rect, text: impl Into<String>, on: bool) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            text: text.into(),
            on,
            changed: false,
        })
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Toggled by the user this frame
    pub fn changed(&self) -> bool {
        self.changed
    }
}

impl Widget for ToggleButton {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.base.hit_test(ctx);
        self.changed = self.base.clicked();
        if self.changed {
            self.on = !self.on;
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        draw_button_face(g, theme, &self.base, &self.text, self.on);
    }
}

pub(crate) fn draw_button_face(g: &mut Graphics, theme: &Theme, base: &WidgetBase, text: &str, active: bool) {
    let rect = base.bounds();
    let fill = if active { theme.accent } else { theme.control_color(base.mouse_state()) };
    let border = if base.mouse_state().is_inside() { theme.accent } else { theme.border };
    paint::frame(g, rect, fill, Some(border), theme.corner_radius);

    let color = if !base.is_enabled() {
        theme.text_dim
    } else if active {
        theme.background
    } else {
        theme.text
    };
    paint::text(g, text, rect, theme.font_size, color, HAlign::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::ui::MouseState;

    fn frame(ctx: &mut UiContext, input: InputSnapshot, w: &mut impl Widget) {
        ctx.begin_frame(input, 0.016);
        w.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_click_fires_on_release_inside() {
        let mut ctx = UiContext::new();
        let mut b = Button::new(Rect::new(0.0, 0.0, 80.0, 24.0), "OK").unwrap();

        frame(&mut ctx, InputSnapshot::at(10.0, 10.0).with_left_pressed(), &mut b);
        assert_eq!(b.mouse_state(), MouseState::Pressed);
        assert!(!b.clicked());

        frame(&mut ctx, InputSnapshot::at(10.0, 10.0).with_left_released(), &mut b);
        assert!(b.clicked());

        frame(&mut ctx, InputSnapshot::at(10.0, 10.0), &mut b);
        assert!(!b.clicked());
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut ctx = UiContext::new();
        let mut b = Button::new(Rect::new(0.0, 0.0, 80.0, 24.0), "OK").unwrap();
        frame(&mut ctx, InputSnapshot::at(200.0, 10.0).with_left_released(), &mut b);
        assert!(!b.clicked());
        assert_eq!(b.mouse_state(), MouseState::Out);
    }

    #[test]
    fn test_disabled_button_never_clicks() {
        let mut ctx = UiContext::new();
        let mut b = Button::new(Rect::new(0.0, 0.0, 80.0, 24.0), "OK").unwrap();
        b.set_enabled(false).unwrap();
        frame(&mut ctx, InputSnapshot::at(10.0, 10.0).with_left_released(), &mut b);
        assert!(!b.clicked());
    }

    #[test]
    fn test_toggle_flips_once_per_click() {
        let mut ctx = UiContext::new();
        let mut t = ToggleButton::new(Rect::new(0.0, 0.0, 80.0, 24.0), "Grid", false).unwrap();
        frame(&mut ctx, InputSnapshot::at(5.0, 5.0).with_left_released(), &mut t);
        assert!(t.is_on());
        assert!(t.changed());
        frame(&mut ctx, InputSnapshot::at(5.0, 5.0), &mut t);
        assert!(t.is_on());
        assert!(!t.changed());
    }

    #[test]
    fn test_bad_size_rejected() {
        assert!(Button::new(Rect::new(0.0, 0.0, -5.0, 24.0), "x").is_err());
        assert!(ToggleButton::new(Rect::new(0.0, 0.0, 5.0, 0.0), "x", true).is_err());
    }
}
