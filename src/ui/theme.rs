//! UI Theme - Shared colors and styling constants
//!
//! One `Theme` is installed globally and handed to every widget's `draw`.
//! Themes are RON files with colors as hex strings; missing fields fall back
//! to the dark theme.

use std::path::Path;
use std::sync::RwLock;
use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};
use crate::engine::ConfigError;
use crate::gfx::color::{self, rgb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // Base
    #[serde(with = "color::serde_hex")]
    pub background: Color,
    #[serde(with = "color::serde_hex")]
    pub panel: Color,
    #[serde(with = "color::serde_hex")]
    pub border: Color,
    #[serde(with = "color::serde_hex")]
    pub text: Color,
    #[serde(with = "color::serde_hex")]
    pub text_dim: Color,
    #[serde(with = "color::serde_hex")]
    pub accent: Color,

    // Controls
    #[serde(with = "color::serde_hex")]
    pub control: Color,
    #[serde(with = "color::serde_hex")]
    pub control_hover: Color,
    #[serde(with = "color::serde_hex")]
    pub control_pressed: Color,
    #[serde(with = "color::serde_hex")]
    pub field: Color,
    #[serde(with = "color::serde_hex")]
    pub selection: Color,
    #[serde(with = "color::serde_hex")]
    pub track: Color,

    // Windows
    #[serde(with = "color::serde_hex")]
    pub title_bar: Color,
    #[serde(with = "color::serde_hex")]
    pub title_text: Color,
    #[serde(with = "color::serde_hex")]
    pub modal_shade: Color,
    #[serde(with = "color::serde_hex")]
    pub tooltip: Color,
    #[serde(with = "color::serde_hex")]
    pub tooltip_text: Color,

    // Metrics
    pub font_size: f32,
    pub font_size_small: f32,
    pub font_size_header: f32,
    pub corner_radius: f32,
    pub padding: f32,
    pub title_bar_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.11, 0.11, 0.13, 1.0),
            panel: Color::new(0.15, 0.15, 0.18, 1.0),
            border: rgb(80, 80, 80),
            text: Color::new(0.8, 0.8, 0.85, 1.0),
            text_dim: Color::new(0.4, 0.4, 0.45, 1.0),
            accent: Color::new(0.0, 0.75, 0.9, 1.0),

            control: rgb(50, 50, 55),
            control_hover: rgb(60, 60, 70),
            control_pressed: rgb(60, 80, 100),
            field: Color::new(0.12, 0.12, 0.14, 1.0),
            selection: Color::new(0.0, 0.5, 0.7, 0.5),
            track: rgb(35, 35, 40),

            title_bar: rgb(45, 45, 50),
            title_text: rgb(220, 220, 220),
            modal_shade: Color::new(0.0, 0.0, 0.0, 0.5),
            tooltip: rgb(45, 45, 50),
            tooltip_text: rgb(220, 220, 220),

            font_size: 14.0,
            font_size_small: 12.0,
            font_size_header: 16.0,
            corner_radius: 4.0,
            padding: 6.0,
            title_bar_height: 24.0,
        }
    }

    pub fn light() -> Self {
        Self {
            background: rgb(236, 236, 240),
            panel: rgb(248, 248, 250),
            border: rgb(170, 170, 178),
            text: rgb(30, 30, 36),
            text_dim: rgb(130, 130, 140),
            accent: rgb(0, 120, 215),

            control: rgb(225, 225, 230),
            control_hover: rgb(210, 215, 225),
            control_pressed: rgb(180, 200, 225),
            field: rgb(255, 255, 255),
            selection: Color::new(0.0, 0.47, 0.84, 0.35),
            track: rgb(210, 210, 215),

            title_bar: rgb(215, 215, 222),
            title_text: rgb(30, 30, 36),
            modal_shade: Color::new(0.0, 0.0, 0.0, 0.3),
            tooltip: rgb(255, 255, 225),
            tooltip_text: rgb(30, 30, 36),

            ..Self::dark()
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ron(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Background for a control in the given pointer state
    pub fn control_color(&self, state: super::MouseState) -> Color {
        match state {
            super::MouseState::Out => self.control,
            super::MouseState::Over => self.control_hover,
            super::MouseState::Pressed | super::MouseState::Down => self.control_pressed,
        }
    }
}

lazy_static::lazy_static! {
    static ref THEME: RwLock<Theme> = RwLock::new(Theme::dark());
}

/// Replace the global theme
pub fn install_theme(theme: Theme) {
    match THEME.write() {
        Ok(mut guard) => *guard = theme,
        Err(poisoned) => *poisoned.into_inner() = theme,
    }
}

/// Copy of the global theme
pub fn theme() -> Theme {
    match THEME.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
