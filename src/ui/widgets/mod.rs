//! The retained widget set

mod button;
mod checkbox;
mod color_picker;
mod combo;
mod dialog;
mod label;
mod list;
mod panel;
mod progress;
mod scrollbar;
mod slider;
mod spinner;
mod text_field;
mod tooltip;
mod window;

pub use button::{Button, ToggleButton};
pub use checkbox::{CheckBox, RadioGroup};
pub use color_picker::ColorPicker;
pub use combo::ComboBox;
pub use dialog::{Dialog, DialogKind, DialogResult};
pub use label::Label;
pub use list::ListBox;
pub use panel::Panel;
pub use progress::{progress_fraction, ProgressBar};
pub use scrollbar::ScrollBar;
pub use slider::{Orientation, Slider};
pub use spinner::Spinner;
pub use text_field::{TextEdit, TextField};
pub use tooltip::Tooltip;
pub use window::Window;

/// Hold time before a held arrow starts repeating
const REPEAT_DELAY: f32 = 0.4;
/// Seconds between repeats once started
const REPEAT_INTERVAL: f32 = 0.05;

fn repeats_by(held: f32) -> u32 {
    if held < REPEAT_DELAY {
        0
    } else {
        ((held - REPEAT_DELAY) / REPEAT_INTERVAL).floor() as u32 + 1
    }
}

/// Repeats due while a button's hold time went from `previous` to `now`
pub(crate) fn auto_repeats(previous: f32, now: f32) -> u32 {
    repeats_by(now).saturating_sub(repeats_by(previous))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_repeat_schedule() {
        assert_eq!(auto_repeats(0.0, 0.39), 0);
        assert_eq!(auto_repeats(0.39, 0.41), 1);
        assert_eq!(auto_repeats(0.41, 0.43), 0);
        assert_eq!(auto_repeats(0.43, 0.47), 1);
        // one long frame catches up every repeat it covered
        assert_eq!(auto_repeats(0.0, 0.62), 5);
    }
}
