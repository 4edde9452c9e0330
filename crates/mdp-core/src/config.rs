// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout, window and palette settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Color;

/// Viewport widths (in logical pixels) at which more panes become visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// At or above this width the editor and set panes are shown side by side
    pub two_pane: f32,
    /// At or above this width all three panes are shown
    pub three_pane: f32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            two_pane: 640.0,
            three_pane: 1024.0,
        }
    }
}

/// Split view sizing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Smallest width any visible pane may shrink to
    pub min_pane_width: f32,

    /// Floor for the second divider's position (editor + set combined)
    pub min_combined_pane_width: f32,

    /// Editor width before the user drags anything
    pub initial_pane_a_width: f32,

    /// Editor + set width before the user drags anything
    pub initial_pane_ab_width: f32,

    pub breakpoints: Breakpoints,

    /// Thickness of each draggable divider
    pub divider_width: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_pane_width: 192.0,
            min_combined_pane_width: 386.0,
            initial_pane_a_width: 350.0,
            initial_pane_ab_width: 650.0,
            breakpoints: Breakpoints::default(),
            divider_width: 8.0,
        }
    }
}

impl LayoutSettings {
    /// Reject settings the split view cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("min_pane_width", self.min_pane_width)?;
        require_positive("min_combined_pane_width", self.min_combined_pane_width)?;
        require_positive("divider_width", self.divider_width)?;
        if self.breakpoints.three_pane <= self.breakpoints.two_pane {
            return Err(ConfigError::Invalid(format!(
                "three_pane breakpoint ({}) must be above two_pane ({})",
                self.breakpoints.three_pane, self.breakpoints.two_pane
            )));
        }
        if self.breakpoints.two_pane < 2.0 * self.min_pane_width
            || self.breakpoints.three_pane < 3.0 * self.min_pane_width
        {
            return Err(ConfigError::Invalid(format!(
                "breakpoints {}/{} cannot fit panes of at least {}",
                self.breakpoints.two_pane, self.breakpoints.three_pane, self.min_pane_width
            )));
        }
        if self.initial_pane_a_width < self.min_pane_width
            || self.initial_pane_a_width + self.min_pane_width > self.initial_pane_ab_width
        {
            return Err(ConfigError::Invalid(format!(
                "initial widths {}/{} leave less than {} for a pane",
                self.initial_pane_a_width, self.initial_pane_ab_width, self.min_pane_width
            )));
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Height of the title bar drawn above the panes
    pub header_height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "MD2PDF".to_string(),
            width: 1200,
            height: 800,
            header_height: 40.0,
        }
    }
}

/// Fill colors for the placeholder panes and their dividers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneColors {
    pub background: Color,
    pub header: Color,
    pub editor: Color,
    pub set: Color,
    pub preview: Color,
    pub divider: Color,
    pub divider_hover: Color,
    pub divider_active: Color,
}

impl Default for PaneColors {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            header: Color::HEADER,
            editor: Color::rgb(0.98, 0.98, 0.97),
            set: Color::rgb(0.95, 0.96, 0.98),
            preview: Color::WHITE,
            divider: Color::DIVIDER,
            divider_hover: Color::DIVIDER_HOVER,
            divider_active: Color::DIVIDER_ACTIVE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pane floors, breakpoints and initial widths
    pub layout: LayoutSettings,

    /// Initial window size and title
    pub window: WindowSettings,

    pub colors: PaneColors,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid layout settings: {0}")]
    Invalid(String),
}

impl Config {
    /// Get the default config file path (~/.config/md2pdf/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("md2pdf").join("config.toml"))
    }

    /// Load and validate config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found or invalid
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load config from a path, falling back to defaults. A missing file is
    /// silent; an unreadable or invalid one is logged.
    pub fn load_from_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}
