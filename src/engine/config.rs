//! Engine configuration
//!
//! Stored as RON so it stays hand-editable:
//! ```ron
//! (
//!     title: "My Game",
//!     width: 800,
//!     height: 600,
//!     target_fps: Some(60),
//!     update_hz: 60,
//! )
//! ```

use std::path::{Path, PathBuf};
use macroquad::prelude::{Color, Conf};
use serde::{Deserialize, Serialize};
use crate::gfx::color;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
    InvalidSize { width: i32, height: i32 },
    InvalidRate(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::InvalidSize { width, height } => {
                write!(f, "Window size must be positive, got {}x{}", width, height)
            }
            ConfigError::InvalidRate(msg) => write!(f, "Invalid rate: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
    pub high_dpi: bool,
    /// Frame pacing target; None renders as fast as the host allows
    pub target_fps: Option<u32>,
    /// Fixed update rate in Hz
    pub update_hz: u32,
    /// Fixed updates allowed per frame before dropping time
    pub max_steps_per_frame: u32,
    pub show_fps: bool,
    /// tracing env-filter directive, overridden by RUST_LOG
    pub log_filter: String,
    #[serde(with = "color::serde_hex")]
    pub clear_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "quadkit".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            high_dpi: false,
            target_fps: Some(60),
            update_hz: 60,
            max_steps_per_frame: 5,
            show_fps: false,
            log_filter: "info".to_string(),
            clear_color: Color::new(0.11, 0.11, 0.13, 1.0),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidSize { width: self.width, height: self.height });
        }
        if self.update_hz == 0 {
            return Err(ConfigError::InvalidRate("update_hz must be at least 1".to_string()));
        }
        if self.target_fps == Some(0) {
            return Err(ConfigError::InvalidRate("target_fps must be at least 1 (or None)".to_string()));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::InvalidRate("max_steps_per_frame must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load, or fall back to defaults when the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// `<config dir>/<app>/engine.ron` for the current user
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_config_path(app: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(app).join("engine.ron"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn user_config_path(_app: &str) -> Option<PathBuf> {
        None
    }

    /// Seconds per fixed update
    pub fn fixed_step(&self) -> f64 {
        1.0 / self.update_hz.max(1) as f64
    }

    /// Seconds per rendered frame, None when unlocked
    pub fn frame_time(&self) -> Option<f64> {
        self.target_fps.filter(|fps| *fps > 0).map(|fps| 1.0 / fps as f64)
    }

    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            window_resizable: self.resizable,
            high_dpi: self.high_dpi,
            ..Default::default()
        }
    }
}
