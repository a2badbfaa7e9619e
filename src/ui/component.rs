//! Closed set of widgets that containers can own

use crate::gfx::Graphics;
use crate::rect::Rect;
use super::widgets::*;
use super::{MouseState, Theme, UiContext, UiError, Widget, WidgetBase};

macro_rules! components {
    ($($variant:ident),* $(,)?) => {
        /// Any widget, so windows and panels can hold a mixed list of children
        #[derive(Debug, Clone)]
        pub enum Component {
            $($variant($variant),)*
        }

        $(
            impl From<$variant> for Component {
                fn from(w: $variant) -> Self {
                    Component::$variant(w)
                }
            }
        )*

        impl Widget for Component {
            fn base(&self) -> &WidgetBase {
                match self { $(Component::$variant(w) => w.base(),)* }
            }

            fn base_mut(&mut self) -> &mut WidgetBase {
                match self { $(Component::$variant(w) => w.base_mut(),)* }
            }

            fn update(&mut self, ctx: &mut UiContext) {
                match self { $(Component::$variant(w) => w.update(ctx),)* }
            }

            fn draw(&self, g: &mut Graphics, theme: &Theme) {
                match self { $(Component::$variant(w) => w.draw(g, theme),)* }
            }

            fn set_bounds(&mut self, bounds: Rect) -> Result<(), UiError> {
                match self { $(Component::$variant(w) => w.set_bounds(bounds),)* }
            }

            fn move_by(&mut self, dx: f32, dy: f32) {
                match self { $(Component::$variant(w) => w.move_by(dx, dy),)* }
            }

            fn set_visible(&mut self, visible: bool) {
                match self { $(Component::$variant(w) => w.set_visible(visible),)* }
            }

            fn set_enabled(&mut self, enabled: bool) -> Result<(), UiError> {
                match self { $(Component::$variant(w) => w.set_enabled(enabled),)* }
            }

            fn mouse_state(&self) -> MouseState {
                match self { $(Component::$variant(w) => w.mouse_state(),)* }
            }
        }
    };
}

components!(
    Label,
    Button,
    ToggleButton,
    CheckBox,
    RadioGroup,
    Slider,
    ScrollBar,
    ProgressBar,
    ListBox,
    TextField,
    ComboBox,
    Spinner,
    ColorPicker,
    Tooltip,
    Window,
    Panel,
    Dialog,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegates_overridden_moves() {
        let list = ListBox::new(Rect::new(0.0, 0.0, 100.0, 60.0), vec!["a".into(), "b".into()]).unwrap();
        let mut c = Component::from(list);
        c.move_by(10.0, 5.0);
        let Component::ListBox(list) = &c else { panic!("wrong variant") };
        assert_eq!(list.bounds(), Rect::new(10.0, 5.0, 100.0, 60.0));
        assert_eq!(list.content_rect().x, 10.0);
    }

    #[test]
    fn test_delegates_modal_guard() {
        let dialog = Dialog::message(Rect::new(0.0, 0.0, 200.0, 100.0), "t", "m").unwrap();
        let mut c: Component = dialog.into();
        assert!(c.set_enabled(false).is_err());
        assert!(c.is_enabled());
    }
}
