use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::paint::{self, Arrow};
use crate::ui::{MouseState, Theme, UiContext, UiError, Widget, WidgetBase};

/// Rows shown before the dropdown would need to scroll
const MAX_VISIBLE_ROWS: usize = 8;

/// Closed: a button showing the selection. Open: a dropdown list below it
/// that holds the pointer until an item is picked or the user clicks away.
/// Draw it after its neighbours so the dropdown lands on top.
#[derive(Debug, Clone)]
pub struct ComboBox {
    base: WidgetBase,
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,
    hovered: Option<usize>,
    /// First item shown in the dropdown
    scroll: usize,
    changed: bool,
}

impl ComboBox {
    pub fn new(bounds: Rect, items: Vec<String>, selected: Option<usize>) -> Result<Self, UiError> {
        let selected = selected.filter(|i| *i < items.len());
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            items,
            selected,
            open: false,
            hovered: None,
            scroll: 0,
            changed: false,
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.items.len());
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    fn visible_rows(&self) -> usize {
        self.items.len().min(MAX_VISIBLE_ROWS)
    }

    pub fn dropdown_rect(&self) -> Rect {
        let b = self.base.bounds();
        Rect::new(b.x, b.bottom(), b.w, b.h * self.visible_rows() as f32)
    }

    fn row_at(&self, y: f32) -> Option<usize> {
        let drop = self.dropdown_rect();
        let row = ((y - drop.y) / self.base.bounds().h).floor();
        if row < 0.0 || row as usize >= self.visible_rows() {
            return None;
        }
        let index = self.scroll + row as usize;
        (index < self.items.len()).then_some(index)
    }

    fn open_list(&mut self) {
        self.open = true;
        let max_scroll = self.items.len().saturating_sub(MAX_VISIBLE_ROWS);
        self.scroll = self.selected.unwrap_or(0).min(max_scroll);
    }
}

impl Widget for ComboBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_visible(&mut self, visible: bool) {
        self.base.set_visible(visible);
        if !visible {
            self.open = false;
        }
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.changed = false;
        self.hovered = None;
        if !self.base.is_active() {
            self.open = false;
            self.base.clear_mouse();
            return;
        }

        if !self.open {
            self.base.hit_test(ctx);
            if self.base.clicked() && !self.items.is_empty() {
                self.open_list();
                ctx.claim_modal(self.base.id());
            }
            return;
        }

        let id = self.base.id();
        ctx.claim_modal(id);
        ctx.with_layer(id, |ctx| {
            let header = self.base.hit_test(ctx);
            let drop = self.dropdown_rect();
            let (mx, my) = (ctx.input.mouse_x, ctx.input.mouse_y);
            let over_list = ctx.pointer_in(&drop);

            if over_list {
                ctx.set_hot(id);
                self.hovered = self.row_at(my);
                if ctx.input.wheel != 0.0 {
                    let max_scroll = self.items.len().saturating_sub(MAX_VISIBLE_ROWS);
                    self.scroll = if ctx.input.wheel > 0.0 {
                        self.scroll.saturating_sub(1)
                    } else {
                        (self.scroll + 1).min(max_scroll)
                    };
                }
            }

            if ctx.input.left_released && over_list {
                if let Some(row) = self.hovered {
                    self.changed = self.selected != Some(row);
                    self.selected = Some(row);
                    self.open = false;
                }
            } else if header == MouseState::Pressed {
                // Clicking the header again closes
                self.open = false;
            } else if ctx.input.left_pressed && !over_list && !self.base.bounds().contains(mx, my) {
                self.open = false;
            }
        });
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        let fill = if self.open { theme.control_pressed } else { theme.control_color(self.base.mouse_state()) };
        paint::frame(g, rect, fill, Some(theme.border), theme.corner_radius);

        let arrow_rect = rect.slice_right(rect.h);
        let text_rect = rect.pad_sides(theme.padding, 0.0, arrow_rect.w, 0.0);
        let color = if self.base.is_enabled() { theme.text } else { theme.text_dim };
        paint::text(g, self.selected_item().unwrap_or(""), text_rect, theme.font_size, color, HAlign::Left);
        paint::arrow(g, arrow_rect, if self.open { Arrow::Up } else { Arrow::Down }, color);

        if !self.open {
            return;
        }
        let drop = self.dropdown_rect();
        paint::frame(g, drop, theme.panel, Some(theme.border), 0.0);
        for row in 0..self.visible_rows() {
            let index = self.scroll + row;
            let Some(item) = self.items.get(index) else { break };
            let row_rect = Rect::new(drop.x, drop.y + rect.h * row as f32, drop.w, rect.h);
            if self.hovered == Some(index) {
                paint::frame(g, row_rect, theme.control_hover, None, 0.0);
            } else if self.selected == Some(index) {
                paint::frame(g, row_rect, theme.selection, None, 0.0);
            }
            let text_rect = row_rect.pad_sides(theme.padding, 0.0, 0.0, 0.0);
            paint::text(g, item, text_rect, theme.font_size, theme.text, HAlign::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::ui::Button;

    fn items() -> Vec<String> {
        vec!["Red".into(), "Green".into(), "Blue".into()]
    }

    fn frame(ctx: &mut UiContext, input: InputSnapshot, combo: &mut ComboBox) {
        ctx.begin_frame(input, 0.016);
        combo.update(ctx);
        ctx.end_frame();
    }

    #[test]
    fn test_open_pick_close() {
        let mut ctx = UiContext::new();
        let mut combo = ComboBox::new(Rect::new(0.0, 0.0, 100.0, 20.0), items(), Some(0)).unwrap();

        frame(&mut ctx, InputSnapshot::at(50.0, 10.0).with_left_released(), &mut combo);
        assert!(combo.is_open());
        assert_eq!(combo.dropdown_rect(), Rect::new(0.0, 20.0, 100.0, 60.0));

        // press and release on "Blue" (third row)
        frame(&mut ctx, InputSnapshot::at(50.0, 65.0).with_left_pressed(), &mut combo);
        assert!(combo.is_open());
        frame(&mut ctx, InputSnapshot::at(50.0, 65.0).with_left_released(), &mut combo);
        assert!(!combo.is_open());
        assert_eq!(combo.selected_item(), Some("Blue"));
        assert!(combo.changed());
    }

    #[test]
    fn test_click_away_closes_without_change() {
        let mut ctx = UiContext::new();
        let mut combo = ComboBox::new(Rect::new(0.0, 0.0, 100.0, 20.0), items(), Some(1)).unwrap();
        frame(&mut ctx, InputSnapshot::at(50.0, 10.0).with_left_released(), &mut combo);
        frame(&mut ctx, InputSnapshot::at(400.0, 400.0).with_left_pressed(), &mut combo);
        assert!(!combo.is_open());
        assert_eq!(combo.selected(), Some(1));
    }

    #[test]
    fn test_open_dropdown_blocks_widgets_below() {
        let mut ctx = UiContext::new();
        let mut combo = ComboBox::new(Rect::new(0.0, 0.0, 100.0, 20.0), items(), None).unwrap();
        let mut under = Button::new(Rect::new(0.0, 20.0, 100.0, 20.0), "under").unwrap();

        frame(&mut ctx, InputSnapshot::at(50.0, 10.0).with_left_released(), &mut combo);

        ctx.begin_frame(InputSnapshot::at(50.0, 30.0).with_left_released(), 0.016);
        under.update(&mut ctx);
        combo.update(&mut ctx);
        ctx.end_frame();
        assert!(!under.clicked());
        assert_eq!(combo.selected_item(), Some("Red"));
    }

    #[test]
    fn test_empty_combo_stays_closed() {
        let mut ctx = UiContext::new();
        let mut combo = ComboBox::new(Rect::new(0.0, 0.0, 100.0, 20.0), vec![], Some(0)).unwrap();
        assert_eq!(combo.selected(), None);
        frame(&mut ctx, InputSnapshot::at(50.0, 10.0).with_left_released(), &mut combo);
        assert!(!combo.is_open());
    }
}
