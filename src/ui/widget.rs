//! The widget trait and the state every widget shares

use crate::gfx::Graphics;
use crate::rect::Rect;
use super::{MouseState, Theme, UiContext, UiError, WidgetId};

pub(crate) fn check_size(bounds: Rect) -> Result<Rect, UiError> {
    // NaN fails both comparisons and is rejected too
    if bounds.w > 0.0 && bounds.h > 0.0 {
        Ok(bounds)
    } else {
        Err(UiError::InvalidSize { width: bounds.w, height: bounds.h })
    }
}

/// Bounds, flags and this frame's pointer state
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: WidgetId,
    bounds: Rect,
    visible: bool,
    enabled: bool,
    mouse: MouseState,
    clicked: bool,
    tooltip: Option<String>,
}

impl WidgetBase {
    pub fn new(bounds: Rect) -> Result<Self, UiError> {
        Ok(Self {
            id: WidgetId::fresh(),
            bounds: check_size(bounds)?,
            visible: true,
            enabled: true,
            mouse: MouseState::Out,
            clicked: false,
            tooltip: None,
        })
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.bounds = self.bounds.translated(dx, dy);
    }

    pub fn resize(&mut self, w: f32, h: f32) -> Result<(), UiError> {
        let resized = check_size(Rect::new(self.bounds.x, self.bounds.y, w, h))?;
        self.bounds = resized;
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.mouse = MouseState::Out;
            self.clicked = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.mouse = MouseState::Out;
            self.clicked = false;
        }
    }

    /// Visible and enabled
    pub fn is_active(&self) -> bool {
        self.visible && self.enabled
    }

    pub fn mouse_state(&self) -> MouseState {
        self.mouse
    }

    /// Button released over the widget this frame
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn set_tooltip(&mut self, text: Option<String>) {
        self.tooltip = text;
    }

    /// Resolve this frame's mouse state against the widget bounds
    pub fn hit_test(&mut self, ctx: &mut UiContext) -> MouseState {
        let bounds = self.bounds;
        self.hit_test_rect(ctx, bounds)
    }

    /// Same as `hit_test` but against a sub-area (e.g. a title bar)
    pub fn hit_test_rect(&mut self, ctx: &mut UiContext, rect: Rect) -> MouseState {
        let inside = self.is_active() && ctx.pointer_in(&rect) && !ctx.drag_blocked(self.id);
        self.mouse = MouseState::resolve(inside, ctx.input.left_down, ctx.input.left_pressed);
        self.clicked = inside && ctx.input.left_released;

        if inside {
            ctx.set_hot(self.id);
            if let Some(tip) = &self.tooltip {
                if ctx.hover_time(self.id) >= ctx.tooltip_delay {
                    ctx.request_tooltip(tip.clone());
                }
            }
        }
        self.mouse
    }

    /// Forget this frame's pointer state (widget skipped its update)
    pub fn clear_mouse(&mut self) {
        self.mouse = MouseState::Out;
        self.clicked = false;
    }
}

/// A retained UI element: it keeps its own state between frames, resolves
/// the pointer in `update` and renders in `draw`.
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Hit test and react to this frame's input
    fn update(&mut self, ctx: &mut UiContext);

    fn draw(&self, g: &mut Graphics, theme: &Theme);

    fn id(&self) -> WidgetId {
        self.base().id()
    }

    fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    /// Move and resize. Children move along; their sizes are kept.
    fn set_bounds(&mut self, bounds: Rect) -> Result<(), UiError> {
        check_size(bounds)?;
        let old = self.bounds();
        self.base_mut().resize(bounds.w, bounds.h)?;
        self.move_by(bounds.x - old.x, bounds.y - old.y);
        Ok(())
    }

    /// Translate the widget (and any children) by (dx, dy)
    fn move_by(&mut self, dx: f32, dy: f32) {
        self.base_mut().translate(dx, dy);
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let b = self.bounds();
        self.move_by(x - b.x, y - b.y);
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), UiError> {
        self.base_mut().set_enabled(enabled);
        Ok(())
    }

    fn mouse_state(&self) -> MouseState {
        self.base().mouse_state()
    }

    fn set_tooltip(&mut self, text: &str) {
        self.base_mut().set_tooltip(Some(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    #[test]
    fn test_rejects_non_positive_size() {
        assert!(WidgetBase::new(Rect::new(0.0, 0.0, 10.0, 10.0)).is_ok());
        assert_eq!(
            WidgetBase::new(Rect::new(0.0, 0.0, 0.0, 10.0)).unwrap_err(),
            UiError::InvalidSize { width: 0.0, height: 10.0 }
        );
        assert!(WidgetBase::new(Rect::new(0.0, 0.0, 10.0, -1.0)).is_err());
        assert!(WidgetBase::new(Rect::new(0.0, 0.0, f32::NAN, 5.0)).is_err());
    }

    #[test]
    fn test_hit_test_states() {
        let mut base = WidgetBase::new(Rect::new(10.0, 10.0, 50.0, 20.0)).unwrap();
        let mut ctx = UiContext::new();

        ctx.begin_frame(InputSnapshot::at(0.0, 0.0).with_left_pressed(), 0.016);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Out);

        ctx.begin_frame(InputSnapshot::at(20.0, 20.0), 0.016);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Over);
        assert!(ctx.is_hot(base.id()));

        ctx.begin_frame(InputSnapshot::at(20.0, 20.0).with_left_pressed(), 0.016);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Pressed);

        ctx.begin_frame(InputSnapshot::at(20.0, 20.0).with_left_down(), 0.016);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Down);
        assert!(!base.clicked());

        ctx.begin_frame(InputSnapshot::at(20.0, 20.0).with_left_released(), 0.016);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Over);
        assert!(base.clicked());
    }

    #[test]
    fn test_disabled_and_hidden_are_out() {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 50.0, 20.0)).unwrap();
        let mut ctx = UiContext::new();
        ctx.begin_frame(InputSnapshot::at(5.0, 5.0).with_left_released(), 0.016);

        base.set_enabled(false);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Out);
        assert!(!base.clicked());

        base.set_enabled(true);
        base.set_visible(false);
        assert_eq!(base.hit_test(&mut ctx), MouseState::Out);
        assert!(!base.clicked());
    }

    #[test]
    fn test_tooltip_after_delay() {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 50.0, 20.0)).unwrap();
        base.set_tooltip(Some("Save".to_string()));
        let mut ctx = UiContext::new();
        let mut shown = false;
        for _ in 0..10 {
            ctx.begin_frame(InputSnapshot::at(5.0, 5.0), 0.1);
            base.hit_test(&mut ctx);
            shown = ctx.tooltip().is_some();
            ctx.end_frame();
        }
        assert!(shown);
        assert_eq!(ctx.tooltip().map(|t| t.text.as_str()), Some("Save"));
    }
}
