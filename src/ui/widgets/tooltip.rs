use crate::gfx::Graphics;
use crate::rect::Rect;
use crate::ui::{Theme, UiContext, UiError, Widget, WidgetBase};

/// Invisible hover area that shows `text` once the pointer has rested on it
/// for the context's tooltip delay. The text itself is drawn by
/// `UiContext::draw_overlay` so it sits above everything else.
#[derive(Debug, Clone)]
pub struct Tooltip {
    base: WidgetBase,
    text: String,
    delay: Option<f32>,
    showing: bool,
}

impl Tooltip {
    pub fn new(area: Rect, text: impl Into<String>) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(area)?,
            text: text.into(),
            delay: None,
            showing: false,
        })
    }

    /// Override the context's delay for this area
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = Some(seconds.max(0.0));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }
}

impl Widget for Tooltip {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let state = self.base.hit_test(ctx);
        let delay = self.delay.unwrap_or(ctx.tooltip_delay);
        self.showing = state.is_inside() && !self.text.is_empty() && ctx.hover_time(self.base.id()) >= delay;
        if self.showing {
            ctx.request_tooltip(self.text.clone());
        }
    }

    fn draw(&self, _g: &mut Graphics, _theme: &Theme) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    fn hover(ctx: &mut UiContext, tip: &mut Tooltip, x: f32, frames: usize, dt: f32) {
        for _ in 0..frames {
            ctx.begin_frame(InputSnapshot::at(x, 5.0), dt);
            tip.update(ctx);
            ctx.end_frame();
        }
    }

    #[test]
    fn test_shows_after_delay_and_hides_on_leave() {
        let mut ctx = UiContext::new();
        let mut tip = Tooltip::new(Rect::new(0.0, 0.0, 50.0, 20.0), "Reset level").unwrap().with_delay(0.3);

        hover(&mut ctx, &mut tip, 10.0, 2, 0.1);
        assert!(!tip.is_showing());
        hover(&mut ctx, &mut tip, 10.0, 4, 0.1);
        assert!(tip.is_showing());
        assert_eq!(ctx.tooltip().map(|t| t.text.as_str()), Some("Reset level"));

        hover(&mut ctx, &mut tip, 100.0, 1, 0.1);
        assert!(!tip.is_showing());
        assert!(ctx.tooltip().is_none());
    }

    #[test]
    fn test_moving_off_restarts_timer() {
        let mut ctx = UiContext::new();
        let mut tip = Tooltip::new(Rect::new(0.0, 0.0, 50.0, 20.0), "x").unwrap().with_delay(0.3);
        hover(&mut ctx, &mut tip, 10.0, 3, 0.1);
        hover(&mut ctx, &mut tip, 100.0, 1, 0.1);
        hover(&mut ctx, &mut tip, 10.0, 2, 0.1);
        assert!(!tip.is_showing());
    }
}
