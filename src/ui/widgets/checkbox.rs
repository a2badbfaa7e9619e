use crate::gfx::{Graphics, HAlign};
use crate::rect::Rect;
use crate::ui::{paint, Theme, UiContext, UiError, Widget, WidgetBase};

/// Square box at the left of `rect` sized to its height
fn box_rect(rect: Rect) -> Rect {
    let size = (rect.h - 6.0).clamp(8.0, 18.0).min(rect.h);
    Rect::new(rect.x, rect.center_y() - size * 0.5, size, size)
}

#[derive(Debug, Clone)]
pub struct CheckBox {
    base: WidgetBase,
    text: String,
    checked: bool,
    changed: bool,
}

impl CheckBox {
    pub fn new(bounds: Rect, text: impl Into<String>, checked: bool) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            text: text.into(),
            checked,
            changed: false,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn changed(&self) -> bool {
        self.changed
    }
}

impl Widget for CheckBox {
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
            self.checked = !self.checked;
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        let bx = box_rect(rect);
        let border = if self.base.mouse_state().is_inside() { theme.accent } else { theme.border };
        paint::frame(g, bx, theme.field, Some(border), 2.0);
        if self.checked {
            paint::check_mark(g, bx, theme.accent);
        }
        let text_color = if self.base.is_enabled() { theme.text } else { theme.text_dim };
        let label = rect.pad_sides(bx.w + theme.padding, 0.0, 0.0, 0.0);
        paint::text(g, &self.text, label, theme.font_size, text_color, HAlign::Left);
    }
}

/// Mutually exclusive options stacked vertically in equal rows
#[derive(Debug, Clone)]
pub struct RadioGroup {
    base: WidgetBase,
    options: Vec<String>,
    selected: Option<usize>,
    hovered: Option<usize>,
    changed: bool,
}

impl RadioGroup {
    pub fn new(bounds: Rect, options: Vec<String>, selected: Option<usize>) -> Result<Self, UiError> {
        let selected = selected.filter(|i| *i < options.len());
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            options,
            selected,
            hovered: None,
            changed: false,
        })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.options.get(i)).map(String::as_str)
    }

    /// Out-of-range indices clear the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.options.len());
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    fn row_height(&self) -> f32 {
        self.base.bounds().h / self.options.len().max(1) as f32
    }

    pub fn row_rect(&self, index: usize) -> Rect {
        let b = self.base.bounds();
        let h = self.row_height();
        Rect::new(b.x, b.y + h * index as f32, b.w, h)
    }

    fn row_at(&self, y: f32) -> Option<usize> {
        let b = self.base.bounds();
        let row = ((y - b.y) / self.row_height()).floor();
        (row >= 0.0 && (row as usize) < self.options.len()).then_some(row as usize)
    }
}

impl Widget for RadioGroup {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let state = self.base.hit_test(ctx);
        self.changed = false;
        self.hovered = if state.is_inside() { self.row_at(ctx.input.mouse_y) } else { None };
        if self.base.clicked() {
            if let Some(row) = self.hovered {
                self.changed = self.selected != Some(row);
                self.selected = Some(row);
            }
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let text_color = if self.base.is_enabled() { theme.text } else { theme.text_dim };
        for (i, option) in self.options.iter().enumerate() {
            let row = self.row_rect(i);
            let dot = box_rect(row);
            let border = if self.hovered == Some(i) { theme.accent } else { theme.border };
            paint::frame(g, dot, theme.field, Some(border), dot.w * 0.5);
            if self.selected == Some(i) {
                paint::frame(g, dot.pad(dot.w * 0.25), theme.accent, None, dot.w * 0.25);
            }
            let label = row.pad_sides(dot.w + theme.padding, 0.0, 0.0, 0.0);
            paint::text(g, option, label, theme.font_size, text_color, HAlign::Left);
        }
    }
}
