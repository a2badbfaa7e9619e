//! Single-line text entry with cursor and selection

use macroquad::prelude::KeyCode;
use crate::gfx::{Graphics, HAlign};
use crate::input::InputSnapshot;
use crate::rect::Rect;
use crate::ui::{paint, MouseState, Theme, UiContext, UiError, Widget, WidgetBase};

/// Editable text with a byte-index cursor kept on char boundaries
#[derive(Debug, Clone, Default)]
pub struct TextEdit {
    text: String,
    /// Cursor position (byte index)
    cursor: usize,
    /// Selection anchor (byte index), if selecting
    anchor: Option<usize>,
    /// Maximum length in chars
    max_chars: Option<usize>,
}

impl TextEdit {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor, anchor: None, max_chars: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text; the excess past the char limit is cut
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if let Some(max) = self.max_chars {
            if let Some((cut, _)) = self.text.char_indices().nth(max) {
                self.text.truncate(cut);
            }
        }
        self.cursor = self.text.len();
        self.anchor = None;
    }

    pub fn set_max_chars(&mut self, max: Option<usize>) {
        self.max_chars = max;
        let text = std::mem::take(&mut self.text);
        self.set_text(text);
    }

    /// Get selected text range (start, end) in sorted order
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.anchor
            .filter(|a| *a != self.cursor)
            .map(|a| (a.min(self.cursor), a.max(self.cursor)))
    }

    pub fn selected_text(&self) -> &str {
        self.selection_range().map_or("", |(s, e)| &self.text[s..e])
    }

    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) => {
                self.text.drain(start..end);
                self.cursor = start;
                self.anchor = None;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor].char_indices().next_back().map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map_or(self.text.len(), |(i, _)| self.cursor + i)
    }

    fn begin_move(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        }
    }

    fn end_move(&mut self, extend: bool) {
        if !extend {
            self.anchor = None;
        }
    }

    /// Move cursor left, optionally extending selection
    pub fn move_left(&mut self, extend: bool) {
        if !extend {
            // Collapse a selection to its start
            if let Some((start, _)) = self.selection_range() {
                self.cursor = start;
                self.anchor = None;
                return;
            }
        }
        self.begin_move(extend);
        self.cursor = self.prev_boundary();
        self.end_move(extend);
    }

    /// Move cursor right, optionally extending selection
    pub fn move_right(&mut self, extend: bool) {
        if !extend {
            if let Some((_, end)) = self.selection_range() {
                self.cursor = end;
                self.anchor = None;
                return;
            }
        }
        self.begin_move(extend);
        self.cursor = self.next_boundary();
        self.end_move(extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = 0;
        self.end_move(extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = self.text.len();
        self.end_move(extend);
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.text.len();
    }

    /// Insert a character at cursor, replacing the selection. Returns false
    /// when the char limit blocks it.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let removed = self.selection_range().map_or(0, |(s, e)| self.text[s..e].chars().count());
        if let Some(max) = self.max_chars {
            if self.text.chars().count() - removed >= max {
                return false;
            }
        }
        self.delete_selection();
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        true
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
    }

    /// Apply this frame's keys and typed chars; returns true if the text changed
    pub fn apply(&mut self, input: &InputSnapshot) -> bool {
        let before = self.text.clone();
        let shift = input.shift;

        for key in &input.keys_pressed {
            match key {
                KeyCode::Left => self.move_left(shift),
                KeyCode::Right => self.move_right(shift),
                KeyCode::Home => self.move_home(shift),
                KeyCode::End => self.move_end(shift),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Delete => self.delete(),
                KeyCode::A if input.ctrl => self.select_all(),
                _ => {}
            }
        }
        if !input.ctrl {
            for ch in &input.chars {
                // Filter control characters
                if *ch >= ' ' && *ch != '\u{7f}' {
                    self.insert_char(*ch);
                }
            }
        }
        self.text != before
    }
}

/// Focusable text box. Click to focus; clicking elsewhere, Enter or Escape
/// gives the keyboard back.
#[derive(Debug, Clone)]
pub struct TextField {
    base: WidgetBase,
    edit: TextEdit,
    placeholder: String,
    focused: bool,
    blink_timer: f32,
    changed: bool,
    submitted: bool,
}

impl TextField {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Result<Self, UiError> {
        Ok(Self {
            base: WidgetBase::new(bounds)?,
            edit: TextEdit::new(text),
            placeholder: String::new(),
            focused: false,
            blink_timer: 0.0,
            changed: false,
            submitted: false,
        })
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.edit.set_max_chars(Some(max));
        self
    }

    pub fn text(&self) -> &str {
        self.edit.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.edit.set_text(text);
    }

    pub fn edit(&self) -> &TextEdit {
        &self.edit
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Text edited this frame
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Enter pressed this frame
    pub fn submitted(&self) -> bool {
        self.submitted
    }
}

impl Widget for TextField {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.changed = false;
        self.submitted = false;
        let id = self.base.id();
        let state = self.base.hit_test(ctx);

        if state == MouseState::Pressed {
            ctx.set_focus(Some(id));
            self.edit.move_end(false);
            self.blink_timer = 0.0;
        } else if ctx.input.left_pressed && ctx.has_focus(id) && ctx.pointer_available() {
            ctx.set_focus(None);
        }
        if !self.base.is_active() && ctx.has_focus(id) {
            ctx.set_focus(None);
        }
        self.focused = ctx.has_focus(id);
        if !self.focused {
            return;
        }

        self.blink_timer += ctx.dt;
        let input = &ctx.input;
        if input.key_pressed(KeyCode::Enter) || input.key_pressed(KeyCode::KpEnter) {
            self.submitted = true;
            ctx.set_focus(None);
            self.focused = false;
            return;
        }
        if input.key_pressed(KeyCode::Escape) {
            ctx.set_focus(None);
            self.focused = false;
            return;
        }
        if !input.keys_pressed.is_empty() || !input.chars.is_empty() {
            self.blink_timer = 0.0;
        }
        self.changed = self.edit.apply(input);
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.base.is_visible() {
            return;
        }
        let rect = self.base.bounds();
        let border = if self.focused { theme.accent } else { theme.border };
        paint::frame(g, rect, theme.field, Some(border), 0.0);

        let size = theme.font_size;
        let inner = rect.pad_sides(theme.padding, 0.0, theme.padding, 0.0);
        let text = self.edit.text();

        if text.is_empty() && !self.focused {
            paint::text(g, &self.placeholder, inner, size, theme.text_dim, HAlign::Left);
            return;
        }

        // Scroll so the cursor stays inside the box
        let cursor_px = paint::text_width(g, &text[..self.edit.cursor()], size);
        let scroll = (cursor_px - inner.w).max(0.0);
        let origin = inner.x - scroll;

        if let Some((start, end)) = self.edit.selection_range() {
            let x0 = origin + paint::text_width(g, &text[..start], size);
            let x1 = origin + paint::text_width(g, &text[..end], size);
            let sel = Rect::new(x0.max(inner.x), rect.y + 4.0, (x1.min(inner.right()) - x0.max(inner.x)).max(0.0), rect.h - 8.0);
            if sel.has_positive_size() {
                paint::frame(g, sel, theme.selection, None, 0.0);
            }
        }

        let color = if self.base.is_enabled() { theme.text } else { theme.text_dim };
        let text_rect = Rect::new(origin, inner.y, inner.w + scroll, inner.h);
        paint::text(g, text, text_rect, size, color, HAlign::Left);

        // Draw cursor (blinking)
        if self.focused && (self.blink_timer % 1.0) < 0.5 {
            let x = origin + cursor_px;
            g.push_style();
            g.stroke(theme.text);
            g.stroke_weight(1.5);
            g.line(x, rect.y + 5.0, x, rect.bottom() - 5.0);
            g.pop_style();
        }
    }
}
