use macroquad::prelude::{vec2, Vec2};
use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Component, MouseState, Theme, UiContext, UiError, Widget, WidgetBase, WidgetId};

const TITLE_HEIGHT: f32 = 24.0;

/// Movable window with a title bar, optional close button and children.
/// Children are laid out relative to the content area when added and move
/// with the window.
#[derive(Debug, Clone)]
pub struct Window {
    base: WidgetBase,
    title: String,
    closable: bool,
    draggable: bool,
    children: Vec<Component>,
    /// Pointer offset from the window origin while dragging
    grab: Option<Vec2>,
    closed: bool,
}

impl Window {
    pub fn new(bounds: Rect, title: impl Into<String>) -> Result<Self, UiError> {
        if bounds.h <= TITLE_HEIGHT {
            return Err(UiError::InvalidSize { width: bounds.w, height: bounds.h });
        }
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            title: title.into(),
            closable: true,
            draggable: true,
            children: Vec::new(),
            grab: None,
            closed: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_closable(&self) -> bool {
        self.closable
    }

    pub fn set_closable(&mut self, closable: bool) {
        self.closable = closable;
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        if !draggable {
            self.grab = None;
        }
    }

    /// Close button hit this frame (the window hides itself)
    pub fn was_closed(&self) -> bool {
        self.closed
    }

    pub fn title_rect(&self) -> Rect {
        self.base.bounds().slice_top(TITLE_HEIGHT)
    }

    pub fn close_rect(&self) -> Rect {
        let title = self.title_rect();
        title.slice_right(title.h).pad(4.0)
    }

    pub fn content_rect(&self) -> Rect {
        self.base.bounds().remaining_after_top(TITLE_HEIGHT)
    }

    /// Add a child positioned relative to the content area
    pub fn add(&mut self, child: impl Into<Component>) -> WidgetId {
        let mut child = child.into();
        let content = self.content_rect();
        child.move_by(content.x, content.y);
        let id = child.id();
        self.children.push(child);
        id
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    pub fn child(&self, id: WidgetId) -> Option<&Component> {
        self.children.iter().find(|c| c.id() == id)
    }

    pub fn child_mut(&mut self, id: WidgetId) -> Option<&mut Component> {
        self.children.iter_mut().find(|c| c.id() == id)
    }

    fn clear_pointer(&mut self) {
        self.base.clear_mouse();
        self.grab = None;
        for child in &mut self.children {
            child.base_mut().clear_mouse();
        }
    }
}

impl Widget for Window {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.base.translate(dx, dy);
        for child in &mut self.children {
            child.move_by(dx, dy);
        }
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), UiError> {
        if bounds.h <= TITLE_HEIGHT {
            return Err(UiError::InvalidSize { width: bounds.w, height: bounds.h });
        }
        let old = self.base.bounds();
        self.base.resize(bounds.w, bounds.h)?;
        self.move_by(bounds.x - old.x, bounds.y - old.y);
        Ok(())
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.closed = false;
        if !self.base.is_active() {
            self.clear_pointer();
            return;
        }

        let id = self.base.id();
        let state = self.base.hit_test(ctx);
        let mouse = ctx.mouse();
        let on_close = self.closable && self.close_rect().contains(mouse.x, mouse.y);

        if on_close && self.base.clicked() {
            self.closed = true;
            self.set_visible(false);
            self.clear_pointer();
            return;
        }

        if self.draggable && state == MouseState::Pressed && self.title_rect().contains(mouse.x, mouse.y) && !on_close {
            ctx.start_drag(id);
            let b = self.base.bounds();
            self.grab = Some(mouse - vec2(b.x, b.y));
        }
        match self.grab {
            Some(grab) if ctx.is_dragging(id) => {
                let b = self.base.bounds();
                let target = mouse - grab;
                self.move_by(target.x - b.x, target.y - b.y);
            }
            _ => self.grab = None,
        }

        for child in &mut self.children {
            child.update(ctx);
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        paint::frame(g, rect, theme.panel, Some(theme.border), theme.corner_radius);

        let title = self.title_rect();
        paint::frame(g, title, theme.title_bar, None, theme.corner_radius);
        let text_rect = title.pad_sides(theme.padding, 0.0, if self.closable { title.h } else { 0.0 }, 0.0);
        paint::text(g, &self.title, text_rect, theme.font_size_header, theme.title_text, HAlign::Left);

        if self.closable {
            let close = self.close_rect();
            let hovered = self.base.mouse_state().is_inside() && self.grab.is_none();
            if hovered {
                paint::frame(g, close, theme.control_hover, None, 2.0);
            }
            paint::cross(g, close, theme.title_text);
        }

        for child in &self.children {
            child.draw(g, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::ui::{Button, Slider};

    fn frame(ctx: &mut UiContext, input: InputSnapshot, w: &mut Window) {
        ctx.begin_frame(input, 0.016);
        w.update(ctx);
        ctx.end_frame();
    }

    fn window() -> Window {
        Window::new(Rect::new(100.0, 100.0, 200.0, 150.0), "Settings").unwrap()
    }

    #[test]
    fn test_children_are_relative_to_content() {
        let mut w = window();
        let id = w.add(Button::new(Rect::new(10.0, 10.0, 60.0, 20.0), "Apply").unwrap());
        assert_eq!(w.child(id).map(|c| c.bounds()), Some(Rect::new(110.0, 134.0, 60.0, 20.0)));
    }

    #[test]
    fn test_move_composes_and_carries_children() {
        let mut w = window();
        let a = w.add(Button::new(Rect::new(10.0, 10.0, 60.0, 20.0), "A").unwrap());
        let b = w.add(Slider::new(Rect::new(0.0, 40.0, 100.0, 16.0), 0.0, 1.0, 0.5).unwrap());
        let mut once = w.clone();

        w.move_by(15.0, -4.0);
        w.move_by(-3.0, 10.0);
        once.move_by(12.0, 6.0);

        assert_eq!(w.bounds(), once.bounds());
        assert_eq!(w.bounds(), Rect::new(112.0, 106.0, 200.0, 150.0));
        for id in [a, b] {
            assert_eq!(w.child(id).map(|c| c.bounds()), once.child(id).map(|c| c.bounds()));
        }
        // offset from the window is unchanged
        let child = w.child(a).map(|c| c.bounds()).unwrap();
        assert_eq!((child.x - w.bounds().x, child.y - w.bounds().y), (10.0, 34.0));
    }

    #[test]
    fn test_title_drag_moves_window() {
        let mut ctx = UiContext::new();
        let mut w = window();
        let id = w.add(Button::new(Rect::new(0.0, 0.0, 50.0, 20.0), "x").unwrap());

        frame(&mut ctx, InputSnapshot::at(150.0, 110.0).with_left_pressed(), &mut w);
        frame(&mut ctx, InputSnapshot::at(170.0, 140.0).with_left_down(), &mut w);
        assert_eq!(w.bounds(), Rect::new(120.0, 130.0, 200.0, 150.0));
        assert_eq!(w.child(id).map(|c| c.bounds().y), Some(154.0));

        frame(&mut ctx, InputSnapshot::at(170.0, 140.0).with_left_released(), &mut w);
        frame(&mut ctx, InputSnapshot::at(300.0, 300.0), &mut w);
        assert_eq!(w.bounds().x, 120.0);
    }

    #[test]
    fn test_drag_from_content_does_not_move() {
        let mut ctx = UiContext::new();
        let mut w = window();
        frame(&mut ctx, InputSnapshot::at(150.0, 200.0).with_left_pressed(), &mut w);
        frame(&mut ctx, InputSnapshot::at(190.0, 240.0).with_left_down(), &mut w);
        assert_eq!(w.bounds().x, 100.0);
    }

    #[test]
    fn test_close_button_hides() {
        let mut ctx = UiContext::new();
        let mut w = window();
        let close = w.close_rect();
        frame(&mut ctx, InputSnapshot::at(close.center_x(), close.center_y()).with_left_released(), &mut w);
        assert!(w.was_closed());
        assert!(!w.is_visible());
    }

    #[test]
    fn test_child_buttons_receive_clicks() {
        let mut ctx = UiContext::new();
        let mut w = window();
        let id = w.add(Button::new(Rect::new(0.0, 0.0, 50.0, 20.0), "ok").unwrap());
        frame(&mut ctx, InputSnapshot::at(110.0, 130.0).with_left_released(), &mut w);
        assert!(matches!(w.child(id), Some(Component::Button(b)) if b.clicked()));
    }

    #[test]
    fn test_too_small_for_title_bar() {
        assert!(Window::new(Rect::new(0.0, 0.0, 100.0, 20.0), "x").is_err());
    }
}
