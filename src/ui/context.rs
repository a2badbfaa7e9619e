//! State shared by every widget during one frame

use std::sync::atomic::{AtomicU64, Ordering};
use macroquad::prelude::{vec2, Vec2};
use crate::gfx::Graphics;
use crate::input::InputSnapshot;
use crate::rect::Rect;
use super::paint;
use super::Theme;

/// Seconds the pointer must rest on a widget before its tooltip shows
pub const TOOLTIP_DELAY: f32 = 0.6;

/// Identity of a widget across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// Ids handed out by `UiContext::next_id` live in the upper half so they
/// never collide with retained widgets
const FRAME_ID_BASE: u64 = 1 << 63;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Allocate an id for a retained widget
    pub fn fresh() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRequest {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// UI context passed through the frame
pub struct UiContext {
    pub input: InputSnapshot,
    /// Seconds since the previous frame
    pub dt: f32,
    /// Widget under the pointer this frame
    pub hot: Option<WidgetId>,
    /// Widget that owns the current drag (if any)
    pub dragging: Option<WidgetId>,
    /// Widget receiving keyboard input
    pub focus: Option<WidgetId>,
    pub tooltip_delay: f32,
    tooltip: Option<TooltipRequest>,
    hover_id: Option<WidgetId>,
    hover_time: f32,
    /// Modal dialog that owns the pointer
    modal: Option<WidgetId>,
    /// Modal claimed during this frame; becomes `modal` next frame
    modal_claim: Option<WidgetId>,
    /// Modal layer currently being updated
    layer: Option<WidgetId>,
    id_counter: u64,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            input: InputSnapshot::default(),
            dt: 0.0,
            hot: None,
            dragging: None,
            focus: None,
            tooltip_delay: TOOLTIP_DELAY,
            tooltip: None,
            hover_id: None,
            hover_time: 0.0,
            modal: None,
            modal_claim: None,
            layer: None,
            id_counter: 0,
        }
    }

    /// Reset at start of frame (call before updating widgets)
    pub fn begin_frame(&mut self, input: InputSnapshot, dt: f32) {
        self.input = input;
        self.dt = dt;
        self.hot = None;
        self.tooltip = None;
        self.id_counter = 0;
        self.modal = self.modal_claim.take();
        self.layer = None;

        // Clear dragging if mouse released
        if !self.input.left_down {
            self.dragging = None;
        }
    }

    /// Close the frame: advance the hover timer
    pub fn end_frame(&mut self) {
        if self.hot.is_some() && self.hot == self.hover_id {
            self.hover_time += self.dt;
        } else {
            self.hover_id = self.hot;
            self.hover_time = 0.0;
        }
    }

    /// Id for an immediate-mode widget, stable while call order is stable
    pub fn next_id(&mut self) -> WidgetId {
        self.id_counter += 1;
        WidgetId(FRAME_ID_BASE | self.id_counter)
    }

    // =========================================================================
    // Pointer routing
    // =========================================================================

    /// Whether widgets updated now may react to the pointer
    pub fn pointer_available(&self) -> bool {
        match self.modal {
            None => true,
            Some(owner) => self.layer == Some(owner),
        }
    }

    /// Pointer over `rect` and not blocked by a modal layer
    pub fn pointer_in(&self, rect: &Rect) -> bool {
        self.pointer_available() && self.input.inside(rect)
    }

    pub fn mouse(&self) -> Vec2 {
        vec2(self.input.mouse_x, self.input.mouse_y)
    }

    /// Claim the pointer for a modal layer. The claim lasts while it is
    /// renewed every frame; the last claim of a frame owns the next one.
    /// With no current owner it takes effect immediately.
    pub fn claim_modal(&mut self, id: WidgetId) {
        self.modal_claim = Some(id);
        if self.modal.is_none() {
            self.modal = Some(id);
        }
    }

    pub fn modal(&self) -> Option<WidgetId> {
        self.modal
    }

    /// Run `f` inside the modal layer of `id`
    pub fn with_layer<R>(&mut self, id: WidgetId, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.layer.replace(id);
        let result = f(self);
        self.layer = previous;
        result
    }

    // =========================================================================
    // Hot / drag / focus
    // =========================================================================

    /// Set hot widget (hovering)
    pub fn set_hot(&mut self, id: WidgetId) {
        // Only set hot if not dragging something else
        if self.dragging.is_none() || self.dragging == Some(id) {
            self.hot = Some(id);
        }
    }

    pub fn is_hot(&self, id: WidgetId) -> bool {
        self.hot == Some(id)
    }

    pub fn start_drag(&mut self, id: WidgetId) {
        self.dragging = Some(id);
    }

    pub fn is_dragging(&self, id: WidgetId) -> bool {
        self.dragging == Some(id)
    }

    /// Someone other than `id` owns the drag
    pub fn drag_blocked(&self, id: WidgetId) -> bool {
        self.dragging.is_some_and(|d| d != id)
    }

    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        self.focus = id;
    }

    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.focus == Some(id)
    }

    // =========================================================================
    // Tooltips
    // =========================================================================

    /// Seconds the pointer has rested on `id`
    pub fn hover_time(&self, id: WidgetId) -> f32 {
        if self.hover_id == Some(id) { self.hover_time } else { 0.0 }
    }

    /// Ask for a tooltip at the pointer; the last request in a frame wins
    pub fn request_tooltip(&mut self, text: impl Into<String>) {
        self.tooltip = Some(TooltipRequest {
            text: text.into(),
            x: self.input.mouse_x,
            y: self.input.mouse_y,
        });
    }

    pub fn tooltip(&self) -> Option<&TooltipRequest> {
        self.tooltip.as_ref()
    }

    /// Draw pending overlays (tooltip); call after all widgets are drawn
    pub fn draw_overlay(&self, g: &mut Graphics, theme: &Theme, screen: Rect) {
        if let Some(tip) = &self.tooltip {
            paint::tooltip_box(g, theme, &tip.text, tip.x, tip.y, screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_unique() {
        let a = WidgetId::fresh();
        let b = WidgetId::fresh();
        assert_ne!(a, b);
        assert!(a.raw() < FRAME_ID_BASE);
    }

    #[test]
    fn test_frame_ids_restart_each_frame() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(InputSnapshot::default(), 0.016);
        let first = ctx.next_id();
        ctx.next_id();
        ctx.begin_frame(InputSnapshot::default(), 0.016);
        assert_eq!(ctx.next_id(), first);
    }

    #[test]
    fn test_drag_released_with_button() {
        let mut ctx = UiContext::new();
        let id = WidgetId::fresh();
        ctx.begin_frame(InputSnapshot::default().with_left_pressed(), 0.016);
        ctx.start_drag(id);
        ctx.begin_frame(InputSnapshot::default().with_left_down(), 0.016);
        assert!(ctx.is_dragging(id));
        ctx.begin_frame(InputSnapshot::default(), 0.016);
        assert!(!ctx.is_dragging(id));
    }

    #[test]
    fn test_modal_blocks_outside_layer() {
        let mut ctx = UiContext::new();
        let dialog = WidgetId::fresh();
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        ctx.begin_frame(InputSnapshot::at(10.0, 10.0), 0.016);
        assert!(ctx.pointer_in(&area));

        ctx.claim_modal(dialog);
        assert!(!ctx.pointer_in(&area));
        assert!(ctx.with_layer(dialog, |c| c.pointer_in(&area)));

        // claim carries into the next frame, then lapses if not renewed
        ctx.begin_frame(InputSnapshot::at(10.0, 10.0), 0.016);
        assert!(!ctx.pointer_in(&area));
        ctx.begin_frame(InputSnapshot::at(10.0, 10.0), 0.016);
        assert!(ctx.pointer_in(&area));
    }

    #[test]
    fn test_nested_popup_takes_over_next_frame() {
        let mut ctx = UiContext::new();
        let dialog = WidgetId::fresh();
        let popup = WidgetId::fresh();
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);

        ctx.begin_frame(InputSnapshot::at(10.0, 10.0), 0.016);
        ctx.claim_modal(dialog);
        ctx.with_layer(dialog, |c| c.claim_modal(popup));
        // dialog keeps the pointer for the rest of this frame
        assert!(ctx.with_layer(dialog, |c| c.pointer_in(&area)));

        ctx.begin_frame(InputSnapshot::at(10.0, 10.0), 0.016);
        ctx.claim_modal(dialog);
        assert!(!ctx.with_layer(dialog, |c| c.pointer_in(&area)));
        assert!(ctx.with_layer(popup, |c| c.pointer_in(&area)));
    }

    #[test]
    fn test_hover_timer_accumulates_on_same_widget() {
        let mut ctx = UiContext::new();
        let id = WidgetId::fresh();
        for _ in 0..3 {
            ctx.begin_frame(InputSnapshot::default(), 0.25);
            ctx.set_hot(id);
            ctx.end_frame();
        }
        assert!((ctx.hover_time(id) - 0.5).abs() < 1e-6);

        ctx.begin_frame(InputSnapshot::default(), 0.25);
        ctx.end_frame();
        assert_eq!(ctx.hover_time(id), 0.0);
    }

    #[test]
    fn test_hot_respects_drag_owner() {
        let mut ctx = UiContext::new();
        let a = WidgetId::fresh();
        let b = WidgetId::fresh();
        ctx.begin_frame(InputSnapshot::default().with_left_down(), 0.016);
        ctx.start_drag(a);
        ctx.set_hot(b);
        assert!(!ctx.is_hot(b));
        assert!(ctx.drag_blocked(b));
        assert!(!ctx.drag_blocked(a));
    }
}
