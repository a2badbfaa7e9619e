use crate::gfx::Graphics;
use crate::rect::Rect;
use crate::ui::{paint, Component, Theme, UiContext, UiError, Widget, WidgetBase, WidgetId};

/// Plain container: optional background, children laid out relative to
/// its top-left corner
#[derive(Debug, Clone)]
pub struct Panel {
    base: WidgetBase,
    children: Vec<Component>,
    background: bool,
    border: bool,
}

impl Panel {
    pub fn new(bounds: Rect) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            children: Vec::new(),
            background: true,
            border: true,
        })
    }

    /// No background or border, just grouping
    pub fn transparent(mut self) -> Self {
        self.background = false;
        self.border = false;
        self
    }

    pub fn add(&mut self, child: impl Into<Component>) -> WidgetId {
        let mut child = child.into();
        let b = self.base.bounds();
        child.move_by(b.x, b.y);
        let id = child.id();
        self.children.push(child);
        id
    }

    pub fn remove(&mut self, id: WidgetId) -> Option<Component> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        Some(self.children.remove(index))
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
}

impl Widget for Panel {
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

    fn update(&mut self, ctx: &mut UiContext) {
        if !self.base.is_active() {
            self.base.clear_mouse();
            for child in &mut self.children {
                child.base_mut().clear_mouse();
            }
            return;
        }
        self.base.hit_test(ctx);
        for child in &mut self.children {
            child.update(ctx);
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        if self.background || self.border {
            let fill = if self.background { theme.panel } else { macroquad::prelude::Color::new(0.0, 0.0, 0.0, 0.0) };
            paint::frame(g, self.base.bounds(), fill, self.border.then_some(theme.border), theme.corner_radius);
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
    use crate::ui::{CheckBox, Label, Window};

    #[test]
    fn test_nested_containers_move_together() {
        let mut inner = Panel::new(Rect::new(10.0, 10.0, 80.0, 60.0)).unwrap();
        let label = inner.add(Label::new(Rect::new(5.0, 5.0, 40.0, 12.0), "hp").unwrap());
        let mut outer = Window::new(Rect::new(0.0, 0.0, 200.0, 200.0), "Stats").unwrap();
        let inner_id = outer.add(inner);

        let mut stepped = outer.clone();
        stepped.move_by(7.0, 3.0);
        stepped.move_by(1.0, 2.0);
        outer.move_by(8.0, 5.0);

        let find = |w: &Window| match w.child(inner_id) {
            Some(Component::Panel(p)) => p.child(label).map(|c| c.bounds()),
            _ => None,
        };
        assert_eq!(find(&stepped), find(&outer));
        assert_eq!(find(&outer), Some(Rect::new(23.0, 44.0, 40.0, 12.0)));
    }

    #[test]
    fn test_disabled_panel_blocks_children() {
        let mut ctx = UiContext::new();
        let mut panel = Panel::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let id = panel.add(CheckBox::new(Rect::new(0.0, 0.0, 100.0, 20.0), "x", false).unwrap());
        panel.set_enabled(false).unwrap();

        ctx.begin_frame(InputSnapshot::at(10.0, 10.0).with_left_released(), 0.016);
        panel.update(&mut ctx);
        assert!(matches!(panel.child(id), Some(Component::CheckBox(c)) if !c.is_checked()));
    }

    #[test]
    fn test_remove_child() {
        let mut panel = Panel::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let id = panel.add(Label::new(Rect::new(0.0, 0.0, 10.0, 10.0), "a").unwrap());
        assert!(panel.remove(id).is_some());
        assert!(panel.children().is_empty());
        assert!(panel.remove(id).is_none());
    }
}
