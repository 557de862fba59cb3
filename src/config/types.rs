//! Configuration section types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::canvas::Resolution;

/// Drawing defaults applied at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial foreground color (name or `#rrggbb` literal).
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Initial resolution mode.
    #[serde(default)]
    pub default_resolution: Resolution,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_resolution: Resolution::default(),
        }
    }
}

fn default_color() -> String {
    "white".to_string()
}

/// Canvas dimensions in cells. Unset axes follow the terminal size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub width: Option<i32>,

    #[serde(default)]
    pub height: Option<i32>,
}

/// UI display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether the status bar starts visible.
    #[serde(default = "default_true")]
    pub show_status_bar: bool,

    /// Whether the help overlay is shown on startup.
    #[serde(default)]
    pub show_help_on_start: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: true,
            show_help_on_start: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Export preferences: where saves land and how default names are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory saves are resolved against. Relative paths typed at the
    /// save prompt land here; absolute paths win.
    #[serde(default)]
    pub save_directory: Option<PathBuf>,

    /// Default filename offered at the save prompt (chrono format
    /// specifiers are expanded).
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: None,
            filename_template: default_filename_template(),
        }
    }
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S.ans".to_string()
}
