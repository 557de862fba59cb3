//! UI text: status bar, prompt line and help overlay content.
//!
//! Rendering happens in the backend; this module only composes the strings,
//! so the content stays testable without a terminal.

use crate::input::Painter;
use crate::util;

/// Builds the status bar text: color, tool, resolution, cursor position,
/// session flags and the help hint.
pub fn status_line(painter: &Painter) -> String {
    let cell = painter.cell_position();
    let offset = painter.sub_cell_offset();
    let mut flags = String::new();
    if painter.continuous_painting() {
        flags.push_str(" [cont]");
    }
    if painter.dirty {
        flags.push_str(" [+]");
    }

    format!(
        "[{}] [{}] [{} {},{} @{},{}]{}  F10=Help",
        util::color_to_name(painter.fg),
        painter.active_kind().label(),
        painter.resolution.label(),
        cell.x,
        cell.y,
        offset.x,
        offset.y,
        flags,
    )
}

/// Builds the prompt line shown while a modal prompt is open, with a
/// trailing caret marking the input point.
pub fn prompt_line(painter: &Painter) -> Option<String> {
    painter
        .prompt
        .as_ref()
        .map(|prompt| format!("{}: {}_", prompt.label(), prompt.buffer))
}

/// The transient status message, if one is pending.
pub fn message_line(painter: &Painter) -> Option<&str> {
    painter.status_message.as_deref()
}

/// Help overlay content for the default keybindings.
pub fn help_lines() -> &'static [&'static str] {
    &[
        "cellbrush: pixel painter",
        "",
        "  arrows      move cursor",
        "  Space       toggle pixel",
        "  v           line from last point",
        "  x           continuous painting",
        "  f           flood fill",
        "  mouse drag  paint stroke",
        "  dbl-click   flood fill",
        "  p / e / t   paint / erase / type",
        "  1-5         full half quarter sextant braille",
        "  u / r       undo / redo",
        "  Ctrl+e      clear canvas",
        "  c           pick color",
        "  s           save (.ans .html .csnap)",
        "  F12         status bar",
        "  q / Escape  quit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::color::RED;
    use crate::canvas::{CellBuffer, Resolution};
    use crate::config::{ExportConfig, KeybindingsConfig};
    use crate::input::events::Key;
    use crate::input::modifiers::Modifiers;

    fn painter() -> Painter {
        Painter::with_defaults(
            CellBuffer::new(10, 10),
            RED,
            Resolution::Braille,
            true,
            ExportConfig::default(),
            KeybindingsConfig::default().build_action_map().unwrap(),
        )
    }

    #[test]
    fn status_line_reflects_state() {
        let mut p = painter();
        let line = status_line(&p);
        assert!(line.contains("[red]"));
        assert!(line.contains("[paint]"));
        assert!(line.contains("[braille 0,0 @0,0]"));
        assert!(!line.contains("[+]"));

        p.on_key_press(Key::Space, Modifiers::NONE);
        assert!(status_line(&p).contains("[+]"));
    }

    #[test]
    fn prompt_line_appears_only_with_a_prompt() {
        let mut p = painter();
        assert!(prompt_line(&p).is_none());
        p.on_key_press(Key::Char('c'), Modifiers::NONE);
        let line = prompt_line(&p).unwrap();
        assert!(line.starts_with("color:"));
    }

    #[test]
    fn help_mentions_every_tool() {
        let help = help_lines().join("\n");
        assert!(help.contains("paint / erase / type"));
        assert!(help.contains("braille"));
    }
}
