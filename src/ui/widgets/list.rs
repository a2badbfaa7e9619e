use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};
use super::{Orientation, ScrollBar};

const SCROLLBAR_WIDTH: f32 = 12.0;

/// Scrollable single-selection list
#[derive(Debug, Clone)]
pub struct ListBox {
    base: WidgetBase,
    items: Vec<String>,
    selected: Option<usize>,
    hovered: Option<usize>,
    item_height: f32,
    scrollbar: ScrollBar,
    changed: bool,
}

impl ListBox {
    pub fn new(bounds: Rect, items: Vec<String>) -> Result<Self, UiError> {
        let base = WidgetBase::new(bounds)?;
        let item_height = 20.0;
        let scrollbar = ScrollBar::new(
            bounds.slice_right(SCROLLBAR_WIDTH),
            Orientation::Vertical,
            items.len() as f32 * item_height,
            bounds.h,
        )?
        .with_line_step(item_height)
        .with_wheel(false);
        Ok(Self {
            base,
            items,
            selected: None,
            hovered: None,
            item_height,
            scrollbar,
            changed: false,
        })
    }

    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height.max(1.0);
        self.scrollbar.set_line_step(self.item_height);
        self.sync_scrollbar();
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = self.selected.filter(|i| *i < self.items.len());
        self.sync_scrollbar();
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        self.sync_scrollbar();
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.items.len());
        if let Some(i) = self.selected {
            self.scroll_to(i);
        }
    }

    /// Selection changed by the user this frame
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scrollbar.offset()
    }

    /// Scroll just enough for `index` to be fully visible
    pub fn scroll_to(&mut self, index: usize) {
        let top = index as f32 * self.item_height;
        let bottom = top + self.item_height;
        let view = self.base.bounds().h;
        let offset = self.scrollbar.offset();
        if top < offset {
            self.scrollbar.set_offset(top);
        } else if bottom > offset + view {
            self.scrollbar.set_offset(bottom - view);
        }
    }

    fn sync_scrollbar(&mut self) {
        let total = self.items.len() as f32 * self.item_height;
        self.scrollbar.set_extent(total, self.base.bounds().h);
    }

    /// Area used by the rows (excludes the scrollbar when shown)
    pub fn content_rect(&self) -> Rect {
        let b = self.base.bounds();
        if self.scrollbar.is_needed() {
            Rect::new(b.x, b.y, (b.w - SCROLLBAR_WIDTH).max(0.0), b.h)
        } else {
            b
        }
    }

    fn item_at(&self, y: f32) -> Option<usize> {
        let b = self.base.bounds();
        let row = ((y - b.y + self.scrollbar.offset()) / self.item_height).floor();
        (row >= 0.0 && (row as usize) < self.items.len()).then_some(row as usize)
    }
}

impl Widget for ListBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.base.translate(dx, dy);
        self.scrollbar.move_by(dx, dy);
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), UiError> {
        let old = self.base.bounds();
        self.base.resize(bounds.w, bounds.h)?;
        self.base.translate(bounds.x - old.x, bounds.y - old.y);
        self.scrollbar.set_bounds(bounds.slice_right(SCROLLBAR_WIDTH))?;
        self.sync_scrollbar();
        Ok(())
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.changed = false;
        self.hovered = None;
        if !self.base.is_active() {
            self.base.clear_mouse();
            self.scrollbar.base_mut().clear_mouse();
            return;
        }

        if self.scrollbar.is_needed() {
            self.scrollbar.update(ctx);
        }
        let content = self.content_rect();
        let state = self.base.hit_test(ctx);

        if state.is_inside() && ctx.input.wheel != 0.0 {
            self.scrollbar.scroll_by(-ctx.input.wheel.signum() * self.item_height * 3.0);
        }
        if state.is_inside() && content.contains(ctx.input.mouse_x, ctx.input.mouse_y) {
            self.hovered = self.item_at(ctx.input.mouse_y);
            if state == crate::ui::MouseState::Pressed {
                if let Some(row) = self.hovered {
                    self.changed = self.selected != Some(row);
                    self.selected = Some(row);
                }
            }
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let b = self.base.bounds();
        paint::frame(g, b, theme.field, Some(theme.border), 0.0);
        let content = self.content_rect();
        let offset = self.scrollbar.offset();
        let first = (offset / self.item_height).floor().max(0.0) as usize;
        let text_color = if self.base.is_enabled() { theme.text } else { theme.text_dim };

        for (i, item) in self.items.iter().enumerate().skip(first) {
            let y = b.y + i as f32 * self.item_height - offset;
            if y >= b.bottom() {
                break;
            }
            // Clip partially visible rows to the list box
            let top = y.max(b.y);
            let bottom = (y + self.item_height).min(b.bottom());
            let row = Rect::new(content.x, top, content.w, bottom - top);
            if self.selected == Some(i) {
                paint::frame(g, row, theme.selection, None, 0.0);
            } else if self.hovered == Some(i) {
                paint::frame(g, row, theme.control_hover, None, 0.0);
            }
            if y >= b.y && y + self.item_height <= b.bottom() + 0.5 {
                let text_rect = Rect::new(content.x, y, content.w, self.item_height).pad_sides(theme.padding, 0.0, 0.0, 0.0);
                paint::text(g, item, text_rect, theme.font_size, text_color, HAlign::Left);
            }
        }

        if self.scrollbar.is_needed() {
            self.scrollbar.draw(g, theme);
        }
    }
}
