use macroquad::prelude::KeyCode;
use crate::gfx::{Graphics, HAlign, VAlign};
use crate::rect::Rect;
use crate::ui::{paint, Component, MouseState, Theme, UiContext, UiError, Widget, WidgetBase, WidgetId};
use super::{Button, Window};

const BUTTON_W: f32 = 80.0;
const BUTTON_H: f32 = 24.0;
const MARGIN: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Single OK button
    Message,
    /// OK and Cancel
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Ok,
    Cancel,
    /// Dismissed with the window close button
    Closed,
}

/// Message or confirmation box built on a `Window`.
///
/// A modal dialog takes the pointer from the rest of the UI while visible,
/// answers Enter/Escape, and can be neither disabled nor given a close
/// button.
#[derive(Debug, Clone)]
pub struct Dialog {
    window: Window,
    message: String,
    kind: DialogKind,
    modal: bool,
    ok: WidgetId,
    cancel: Option<WidgetId>,
    result: Option<DialogResult>,
    answered: bool,
}

impl Dialog {
    pub fn new(bounds: Rect, title: &str, message: &str, kind: DialogKind, modal: bool) -> Result<Self, UiError> {
        let mut window = Window::new(bounds, title)?;
        window.set_closable(!modal);
        let content = window.content_rect();
        let y = content.h - BUTTON_H - MARGIN;
        let mut x = content.w - BUTTON_W - MARGIN;

        let cancel = match kind {
            DialogKind::Confirm => {
                let id = window.add(Button::new(Rect::new(x, y, BUTTON_W, BUTTON_H), "Cancel")?);
                x -= BUTTON_W + MARGIN;
                Some(id)
            }
            DialogKind::Message => None,
        };
        let ok = window.add(Button::new(Rect::new(x, y, BUTTON_W, BUTTON_H), "OK")?);

        Ok(Self {
            window,
            message: message.to_string(),
            kind,
            modal,
            ok,
            cancel,
            result: None,
            answered: false,
        })
    }

    pub fn message(bounds: Rect, title: &str, message: &str) -> Result<Self, UiError> {
        Self::new(bounds, title, message, DialogKind::Message, true)
    }

    pub fn confirm(bounds: Rect, title: &str, message: &str) -> Result<Self, UiError> {
        Self::new(bounds, title, message, DialogKind::Confirm, true)
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Switching to modal removes the close button
    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
        if modal {
            self.window.set_closable(false);
        }
    }

    pub fn set_closable(&mut self, closable: bool) -> Result<(), UiError> {
        if closable && self.modal {
            return Err(UiError::ModalDialog("set_closable(true)"));
        }
        self.window.set_closable(closable);
        Ok(())
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Show again and forget the previous answer
    pub fn show(&mut self) {
        self.result = None;
        self.answered = false;
        self.window.set_visible(true);
    }

    /// How the dialog was last dismissed
    pub fn result(&self) -> Option<DialogResult> {
        self.result
    }

    /// Dismissed during this frame's update
    pub fn answered(&self) -> bool {
        self.answered
    }

    fn button_clicked(&self, id: WidgetId) -> bool {
        matches!(self.window.child(id), Some(Component::Button(b)) if b.clicked())
    }

    fn finish(&mut self, result: DialogResult) {
        self.result = Some(result);
        self.answered = true;
        self.window.set_visible(false);
    }

    fn update_inner(&mut self, ctx: &mut UiContext) {
        self.window.update(ctx);
        if self.window.was_closed() {
            self.result = Some(DialogResult::Closed);
            self.answered = true;
            return;
        }
        if self.button_clicked(self.ok) {
            self.finish(DialogResult::Ok);
        } else if self.cancel.is_some_and(|id| self.button_clicked(id)) {
            self.finish(DialogResult::Cancel);
        } else if self.modal && ctx.focus.is_none() {
            if ctx.input.key_pressed(KeyCode::Enter) || ctx.input.key_pressed(KeyCode::KpEnter) {
                self.finish(DialogResult::Ok);
            } else if ctx.input.key_pressed(KeyCode::Escape) {
                let result = match self.kind {
                    DialogKind::Confirm => DialogResult::Cancel,
                    DialogKind::Message => DialogResult::Ok,
                };
                self.finish(result);
            }
        }
    }
}

impl Widget for Dialog {
    fn base(&self) -> &WidgetBase {
        self.window.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.window.base_mut()
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.window.move_by(dx, dy);
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), UiError> {
        self.window.set_bounds(bounds)
    }

    fn set_visible(&mut self, visible: bool) {
        if visible && !self.window.is_visible() {
            self.show();
        } else {
            self.window.set_visible(visible);
        }
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), UiError> {
        if !enabled && self.modal {
            return Err(UiError::ModalDialog("set_enabled(false)"));
        }
        self.window.set_enabled(enabled)
    }

    fn mouse_state(&self) -> MouseState {
        self.window.mouse_state()
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.answered = false;
        if !self.window.is_visible() {
            return;
        }
        if self.modal {
            let id = self.window.id();
            ctx.claim_modal(id);
            ctx.with_layer(id, |ctx| self.update_inner(ctx));
        } else {
            self.update_inner(ctx);
        }
    }

    fn draw(&self, g: &mut Graphics, theme: &Theme) {
        if !self.window.is_visible() {
            return;
        }
        if self.modal {
            let screen = Rect::new(0.0, 0.0, macroquad::window::screen_width(), macroquad::window::screen_height());
            let local = g.screen_to_local(screen.x, screen.y);
            paint::frame(g, Rect::new(local.x, local.y, screen.w, screen.h), theme.modal_shade, None, 0.0);
        }
        self.window.draw(g, theme);

        let content = self.window.content_rect();
        let text_area = content.pad_sides(MARGIN * 1.5, MARGIN * 1.5, MARGIN * 1.5, BUTTON_H + MARGIN * 2.0);
        g.push_style();
        g.fill(theme.text);
        g.text_size(theme.font_size);
        g.text_align(HAlign::Left, VAlign::Top);
        g.text_in_rect(&self.message, text_area);
        g.pop_style();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    fn bounds() -> Rect {
        Rect::new(100.0, 100.0, 300.0, 140.0)
    }

    fn frame(ctx: &mut UiContext, input: InputSnapshot, d: &mut Dialog) {
        ctx.begin_frame(input, 0.016);
        d.update(ctx);
        ctx.end_frame();
    }

    fn center(r: Rect) -> (f32, f32) {
        (r.center_x(), r.center_y())
    }

    fn button_rect(d: &Dialog, id: WidgetId) -> Rect {
        d.window.child(id).map(|c| c.bounds()).unwrap()
    }

    #[test]
    fn test_modal_rejects_disable_and_close_button() {
        let mut d = Dialog::message(bounds(), "Saved", "Level saved.").unwrap();
        assert_eq!(d.set_enabled(false), Err(UiError::ModalDialog("set_enabled(false)")));
        assert_eq!(d.set_closable(true), Err(UiError::ModalDialog("set_closable(true)")));
        assert!(d.is_enabled());
        assert!(!d.window.is_closable());
        assert!(d.set_enabled(true).is_ok());
        assert!(d.set_closable(false).is_ok());
    }

    #[test]
    fn test_modeless_allows_both() {
        let mut d = Dialog::new(bounds(), "Info", "hi", DialogKind::Message, false).unwrap();
        assert!(d.set_closable(true).is_ok());
        assert!(d.set_enabled(false).is_ok());
        assert!(!d.is_enabled());
        d.set_modal(true);
        assert!(!d.window.is_closable());
    }

    #[test]
    fn test_confirm_buttons_layout() {
        let d = Dialog::confirm(bounds(), "Quit?", "Unsaved changes").unwrap();
        let ok = button_rect(&d, d.ok);
        let cancel = button_rect(&d, d.cancel.unwrap());
        assert_eq!(cancel.right(), 392.0);
        assert_eq!(ok.right(), cancel.x - MARGIN);
        assert_eq!(ok.bottom(), 232.0);
    }

    #[test]
    fn test_ok_and_cancel_answers() {
        let mut ctx = UiContext::new();
        let mut d = Dialog::confirm(bounds(), "Quit?", "Unsaved changes").unwrap();
        let (x, y) = center(button_rect(&d, d.cancel.unwrap()));
        frame(&mut ctx, InputSnapshot::at(x, y).with_left_released(), &mut d);
        assert_eq!(d.result(), Some(DialogResult::Cancel));
        assert!(d.answered());
        assert!(!d.is_visible());

        d.show();
        assert_eq!(d.result(), None);
        let (x, y) = center(button_rect(&d, d.ok));
        frame(&mut ctx, InputSnapshot::at(x, y).with_left_released(), &mut d);
        assert_eq!(d.result(), Some(DialogResult::Ok));
    }

    #[test]
    fn test_modal_blocks_other_widgets() {
        let mut ctx = UiContext::new();
        let mut d = Dialog::message(bounds(), "Paused", "Game paused").unwrap();
        let mut behind = Button::new(Rect::new(0.0, 0.0, 50.0, 50.0), "menu").unwrap();

        for _ in 0..2 {
            ctx.begin_frame(InputSnapshot::at(10.0, 10.0).with_left_released(), 0.016);
            behind.update(&mut ctx);
            d.update(&mut ctx);
            ctx.end_frame();
        }
        assert!(!behind.clicked());

        // once dismissed the claim lapses
        frame(&mut ctx, InputSnapshot::default().with_key_pressed(KeyCode::Enter), &mut d);
        assert_eq!(d.result(), Some(DialogResult::Ok));
        ctx.begin_frame(InputSnapshot::at(10.0, 10.0).with_left_released(), 0.016);
        ctx.begin_frame(InputSnapshot::at(10.0, 10.0).with_left_released(), 0.016);
        behind.update(&mut ctx);
        assert!(behind.clicked());
    }

    #[test]
    fn test_escape_cancels_confirm() {
        let mut ctx = UiContext::new();
        let mut d = Dialog::confirm(bounds(), "Delete?", "").unwrap();
        frame(&mut ctx, InputSnapshot::default().with_key_pressed(KeyCode::Escape), &mut d);
        assert_eq!(d.result(), Some(DialogResult::Cancel));
    }

    #[test]
    fn test_moves_with_buttons() {
        let mut d = Dialog::message(bounds(), "a", "b").unwrap();
        let before = button_rect(&d, d.ok);
        d.move_by(10.0, 20.0);
        d.move_by(5.0, -5.0);
        assert_eq!(button_rect(&d, d.ok), before.translated(15.0, 15.0));
        assert_eq!(d.bounds(), bounds().translated(15.0, 15.0));
    }
}
