//! Configuration file support for cellbrush.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/cellbrush/config.toml`.
//! Settings include drawing defaults, canvas size, export preferences, UI
//! preferences and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::util;

/// Bounds for configured canvas dimensions, in cells.
const MIN_CANVAS_CELLS: i32 = 4;
const MAX_CANVAS_CELLS: i32 = 1000;

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields have
/// sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "green"
/// default_resolution = "braille"
///
/// [canvas]
/// width = 80
/// height = 24
///
/// [ui]
/// show_status_bar = true
///
/// [export]
/// filename_template = "drawing_%Y-%m-%d_%H%M%S.ans"
///
/// [keybindings]
/// quit = ["q", "Escape"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing defaults (color, resolution)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// UI display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Export preferences
    #[serde(default)]
    pub export: ExportConfig,

    /// Keybinding overrides
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Loads the configuration from the default path, falling back to
    /// defaults when the file does not exist.
    ///
    /// A malformed file is an error; unknown color names or out-of-range
    /// sizes are clamped with a warning instead.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads and validates the configuration from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Location of the user config file, if a config directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cellbrush").join("config.toml"))
    }

    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged; an unknown color name falls back to the default.
    fn validate_and_clamp(&mut self) {
        if util::parse_color(&self.drawing.default_color).is_none() {
            log::warn!(
                "Unknown default_color '{}', falling back to white",
                self.drawing.default_color
            );
            self.drawing.default_color = "white".to_string();
        }

        for (axis, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if let Some(cells) = value {
                if !(MIN_CANVAS_CELLS..=MAX_CANVAS_CELLS).contains(cells) {
                    log::warn!(
                        "Invalid canvas {axis} {cells}, clamping to {MIN_CANVAS_CELLS}-{MAX_CANVAS_CELLS}"
                    );
                    *cells = (*cells).clamp(MIN_CANVAS_CELLS, MAX_CANVAS_CELLS);
                }
            }
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, restoring default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.drawing.default_color, "white");
        assert!(config.ui.show_status_bar);
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = "green"

            [canvas]
            width = 40
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_color, "green");
        assert_eq!(config.canvas.width, Some(40));
        assert_eq!(config.canvas.height, None);
    }

    #[test]
    fn clamps_out_of_range_canvas_size() {
        let mut config: Config = toml::from_str(
            r#"
            [canvas]
            width = 2
            height = 5000
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.canvas.width, Some(MIN_CANVAS_CELLS));
        assert_eq!(config.canvas.height, Some(MAX_CANVAS_CELLS));
    }

    #[test]
    fn unknown_color_falls_back_to_white() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = "blurple"
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_color, "white");
    }
}
