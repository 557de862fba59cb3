//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for all actions in the application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Exit and session
    Quit,
    Save,

    // Painting
    TogglePixel,
    ConnectLine,
    ToggleContinuous,
    FloodFill,
    Undo,
    Redo,
    ClearCanvas,

    // Tool selection
    ToolPaint,
    ToolErase,
    ToolPathType,

    // Resolution selection
    ResolutionFull,
    ResolutionHalf,
    ResolutionQuarter,
    ResolutionSextant,
    ResolutionBraille,

    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // UI toggles and prompts
    PickColor,
    ToggleHelp,
    ToggleStatusBar,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+S" or "Escape".
    /// Modifiers can appear in any order: "Shift+Ctrl+S", "Alt+Shift+S", etc.
    /// Supports spaces around '+' (e.g., "Ctrl + S").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");
        let parts: Vec<&str> = normalized.split('+').collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        // Join with '+' so that '+' itself can be bound ("Ctrl++" splits
        // into empty parts that rejoin to the bare key).
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        if key == "+" && !normalized.contains('+') {
            return Err(format!("No key specified in: {s}"));
        }

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in
/// config.toml as:
/// ```toml
/// [keybindings]
/// quit = ["q", "Escape"]
/// undo = ["u", "Ctrl+z"]
/// toggle_pixel = ["Space"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_quit")]
    pub quit: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_toggle_pixel")]
    pub toggle_pixel: Vec<String>,

    #[serde(default = "default_connect_line")]
    pub connect_line: Vec<String>,

    #[serde(default = "default_toggle_continuous")]
    pub toggle_continuous: Vec<String>,

    #[serde(default = "default_flood_fill")]
    pub flood_fill: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_tool_paint")]
    pub tool_paint: Vec<String>,

    #[serde(default = "default_tool_erase")]
    pub tool_erase: Vec<String>,

    #[serde(default = "default_tool_path_type")]
    pub tool_path_type: Vec<String>,

    #[serde(default = "default_resolution_full")]
    pub resolution_full: Vec<String>,

    #[serde(default = "default_resolution_half")]
    pub resolution_half: Vec<String>,

    #[serde(default = "default_resolution_quarter")]
    pub resolution_quarter: Vec<String>,

    #[serde(default = "default_resolution_sextant")]
    pub resolution_sextant: Vec<String>,

    #[serde(default = "default_resolution_braille")]
    pub resolution_braille: Vec<String>,

    #[serde(default = "default_move_left")]
    pub move_left: Vec<String>,

    #[serde(default = "default_move_right")]
    pub move_right: Vec<String>,

    #[serde(default = "default_move_up")]
    pub move_up: Vec<String>,

    #[serde(default = "default_move_down")]
    pub move_down: Vec<String>,

    #[serde(default = "default_pick_color")]
    pub pick_color: Vec<String>,

    #[serde(default = "default_toggle_help")]
    pub toggle_help: Vec<String>,

    #[serde(default = "default_toggle_status_bar")]
    pub toggle_status_bar: Vec<String>,
}

fn default_quit() -> Vec<String> {
    vec!["q".into(), "Escape".into()]
}

fn default_save() -> Vec<String> {
    vec!["s".into()]
}

fn default_toggle_pixel() -> Vec<String> {
    vec!["Space".into()]
}

fn default_connect_line() -> Vec<String> {
    vec!["v".into()]
}

fn default_toggle_continuous() -> Vec<String> {
    vec!["x".into()]
}

fn default_flood_fill() -> Vec<String> {
    vec!["f".into()]
}

fn default_undo() -> Vec<String> {
    vec!["u".into(), "Ctrl+z".into()]
}

fn default_redo() -> Vec<String> {
    vec!["r".into(), "Ctrl+y".into()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["Ctrl+e".into()]
}

fn default_tool_paint() -> Vec<String> {
    vec!["p".into()]
}

fn default_tool_erase() -> Vec<String> {
    vec!["e".into()]
}

fn default_tool_path_type() -> Vec<String> {
    vec!["t".into()]
}

fn default_resolution_full() -> Vec<String> {
    vec!["1".into()]
}

fn default_resolution_half() -> Vec<String> {
    vec!["2".into()]
}

fn default_resolution_quarter() -> Vec<String> {
    vec!["3".into()]
}

fn default_resolution_sextant() -> Vec<String> {
    vec!["4".into()]
}

fn default_resolution_braille() -> Vec<String> {
    vec!["5".into()]
}

fn default_move_left() -> Vec<String> {
    vec!["Left".into()]
}

fn default_move_right() -> Vec<String> {
    vec!["Right".into()]
}

fn default_move_up() -> Vec<String> {
    vec!["Up".into()]
}

fn default_move_down() -> Vec<String> {
    vec!["Down".into()]
}

fn default_pick_color() -> Vec<String> {
    vec!["c".into()]
}

fn default_toggle_help() -> Vec<String> {
    vec!["F10".into()]
}

fn default_toggle_status_bar() -> Vec<String> {
    vec!["F12".into()]
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            save: default_save(),
            toggle_pixel: default_toggle_pixel(),
            connect_line: default_connect_line(),
            toggle_continuous: default_toggle_continuous(),
            flood_fill: default_flood_fill(),
            undo: default_undo(),
            redo: default_redo(),
            clear_canvas: default_clear_canvas(),
            tool_paint: default_tool_paint(),
            tool_erase: default_tool_erase(),
            tool_path_type: default_tool_path_type(),
            resolution_full: default_resolution_full(),
            resolution_half: default_resolution_half(),
            resolution_quarter: default_resolution_quarter(),
            resolution_sextant: default_resolution_sextant(),
            resolution_braille: default_resolution_braille(),
            move_left: default_move_left(),
            move_right: default_move_right(),
            move_up: default_move_up(),
            move_down: default_move_down(),
            pick_color: default_pick_color(),
            toggle_help: default_toggle_help(),
            toggle_status_bar: default_toggle_status_bar(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates
    /// are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_all = |bindings: &[String], action: Action| -> Result<(), String> {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{binding_str}' assigned to both {existing:?} and {action:?}"
                    ));
                }
            }
            Ok(())
        };

        insert_all(&self.quit, Action::Quit)?;
        insert_all(&self.save, Action::Save)?;
        insert_all(&self.toggle_pixel, Action::TogglePixel)?;
        insert_all(&self.connect_line, Action::ConnectLine)?;
        insert_all(&self.toggle_continuous, Action::ToggleContinuous)?;
        insert_all(&self.flood_fill, Action::FloodFill)?;
        insert_all(&self.undo, Action::Undo)?;
        insert_all(&self.redo, Action::Redo)?;
        insert_all(&self.clear_canvas, Action::ClearCanvas)?;
        insert_all(&self.tool_paint, Action::ToolPaint)?;
        insert_all(&self.tool_erase, Action::ToolErase)?;
        insert_all(&self.tool_path_type, Action::ToolPathType)?;
        insert_all(&self.resolution_full, Action::ResolutionFull)?;
        insert_all(&self.resolution_half, Action::ResolutionHalf)?;
        insert_all(&self.resolution_quarter, Action::ResolutionQuarter)?;
        insert_all(&self.resolution_sextant, Action::ResolutionSextant)?;
        insert_all(&self.resolution_braille, Action::ResolutionBraille)?;
        insert_all(&self.move_left, Action::MoveLeft)?;
        insert_all(&self.move_right, Action::MoveRight)?;
        insert_all(&self.move_up, Action::MoveUp)?;
        insert_all(&self.move_down, Action::MoveDown)?;
        insert_all(&self.pick_color, Action::PickColor)?;
        insert_all(&self.toggle_help, Action::ToggleHelp)?;
        insert_all(&self.toggle_status_bar, Action::ToggleStatusBar)?;

        Ok(map)
    }
}
