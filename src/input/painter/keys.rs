//! Key dispatch and action handling.

use log::{debug, info, warn};

use crate::canvas::Resolution;
use crate::config::Action;
use crate::input::events::Key;
use crate::input::modifiers::Modifiers;
use crate::input::tool::ToolKind;
use crate::session;
use crate::util;

use super::core::{ActiveTool, Painter};
use super::prompt::{Prompt, PromptEvent, PromptKind};

/// Stable name of a key for action-map lookup, `None` for keys that can
/// never be bound.
fn key_name(key: Key) -> Option<String> {
    let name = match key {
        Key::Char(c) => c.to_string(),
        Key::Escape => "Escape".to_string(),
        Key::Return => "Return".to_string(),
        Key::Backspace => "Backspace".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Space => "Space".to_string(),
        Key::Left => "Left".to_string(),
        Key::Right => "Right".to_string(),
        Key::Up => "Up".to_string(),
        Key::Down => "Down".to_string(),
        Key::F10 => "F10".to_string(),
        Key::F12 => "F12".to_string(),
        Key::Unknown => return None,
    };
    Some(name)
}

impl Painter {
    /// Processes a key press event.
    ///
    /// Precedence:
    /// 1. An open prompt captures every key.
    /// 2. With the path-typing tool active, unmodified character keys are
    ///    typed rather than looked up as actions; Escape exits the tool.
    /// 3. Everything else resolves through the keybinding action map.
    pub fn on_key_press(&mut self, key: Key, mods: Modifiers) {
        let revision = self.buffer.revision();
        self.dispatch_key(key, mods);
        self.note_mutations(revision);
    }

    fn dispatch_key(&mut self, key: Key, mods: Modifiers) {
        if self.prompt.is_some() {
            self.feed_prompt(key);
            return;
        }

        if matches!(self.tool, ActiveTool::PathType(_)) && !mods.ctrl && !mods.alt {
            match key {
                Key::Char(c) => {
                    self.path_type_char(c);
                    return;
                }
                Key::Space => {
                    self.path_type_char(' ');
                    return;
                }
                Key::Backspace => {
                    if let ActiveTool::PathType(tool) = &mut self.tool {
                        tool.backspace(&mut self.buffer);
                        self.needs_redraw = true;
                    }
                    return;
                }
                Key::Escape => {
                    self.exit_path_type();
                    return;
                }
                _ => {}
            }
        }

        let Some(name) = key_name(key) else { return };
        if let Some(action) = self.find_action(&name, mods) {
            self.handle_action(action);
        }
    }

    /// Handle an action triggered by a keybinding.
    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_quit(),
            Action::Save => {
                let initial = session::default_filename(&self.export.filename_template);
                self.open_prompt(PromptKind::SaveFilename, initial);
            }
            Action::PickColor => self.open_prompt(PromptKind::ColorLiteral, String::new()),
            Action::TogglePixel => self.toggle_at_position(),
            Action::ConnectLine => {
                if let ActiveTool::Paint(brush) | ActiveTool::Erase(brush) = &mut self.tool {
                    brush.set_point(&mut self.buffer, self.resolution, self.fg, self.pos, true);
                }
            }
            Action::ToggleContinuous => self.toggle_continuous(),
            Action::FloodFill => {
                let cell = self.cell_position();
                self.flood_fill_at(cell);
            }
            Action::Undo => {
                if self.buffer.undo() {
                    self.dirty = true;
                    self.needs_redraw = true;
                } else {
                    self.status_message = Some("nothing to undo".into());
                    self.needs_redraw = true;
                }
            }
            Action::Redo => {
                if self.buffer.redo() {
                    self.dirty = true;
                    self.needs_redraw = true;
                } else {
                    self.status_message = Some("nothing to redo".into());
                    self.needs_redraw = true;
                }
            }
            Action::ClearCanvas => {
                if !self.stroke.is_open() {
                    self.buffer.clear();
                    info!("Canvas cleared");
                }
            }
            Action::ToolPaint => self.switch_tool(ToolKind::Paint),
            Action::ToolErase => self.switch_tool(ToolKind::Erase),
            Action::ToolPathType => self.switch_tool(ToolKind::PathType),
            Action::ResolutionFull => self.switch_resolution(Resolution::Full),
            Action::ResolutionHalf => self.switch_resolution(Resolution::Half),
            Action::ResolutionQuarter => self.switch_resolution(Resolution::Quarter),
            Action::ResolutionSextant => self.switch_resolution(Resolution::Sextant),
            Action::ResolutionBraille => self.switch_resolution(Resolution::Braille),
            Action::MoveLeft => self.move_cursor(-1, 0),
            Action::MoveRight => self.move_cursor(1, 0),
            Action::MoveUp => self.move_cursor(0, -1),
            Action::MoveDown => self.move_cursor(0, 1),
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.needs_redraw = true;
            }
            Action::ToggleStatusBar => {
                self.show_status_bar = !self.show_status_bar;
                self.needs_redraw = true;
            }
        }
    }

    /// Routes the toggle-pixel key to the active tool at the current
    /// position.
    fn toggle_at_position(&mut self) {
        match &mut self.tool {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => {
                brush.toggle_point(&mut self.buffer, self.resolution, self.fg, self.pos);
            }
            ActiveTool::PathType(tool) => {
                let (cell, _) = self.resolution.to_cell_and_offset(self.pos);
                tool.toggle_point(&self.buffer, cell);
                self.needs_redraw = true;
            }
        }
    }

    /// Flips continuous painting. The span while it is on forms one stroke,
    /// so a whole keyboard trail reverts with a single undo.
    fn toggle_continuous(&mut self) {
        let on = match &mut self.tool {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => brush.toggle_continuous(),
            ActiveTool::PathType(_) => return,
        };
        if on {
            self.stroke.begin(&mut self.buffer);
        } else {
            self.stroke.end(&mut self.buffer);
        }
        self.status_message = Some(
            if on {
                "continuous painting on"
            } else {
                "continuous painting off"
            }
            .into(),
        );
        self.needs_redraw = true;
    }

    fn request_quit(&mut self) {
        if self.dirty {
            self.open_prompt(PromptKind::ConfirmQuit, String::new());
        } else {
            self.should_exit = true;
        }
    }

    pub(super) fn open_prompt(&mut self, kind: PromptKind, initial: String) {
        self.prompt = Some(Prompt::new(kind, initial));
        self.needs_redraw = true;
    }

    fn feed_prompt(&mut self, key: Key) {
        let Some(prompt) = &mut self.prompt else { return };
        match prompt.handle_key(key) {
            PromptEvent::Pending => {
                self.needs_redraw = true;
            }
            PromptEvent::Cancelled => {
                // Cancellation is a distinct no-op: all drawing state stays
                // untouched.
                debug!("prompt cancelled");
                self.prompt = None;
                self.needs_redraw = true;
            }
            PromptEvent::Submitted(value) => {
                let kind = prompt.kind;
                self.prompt = None;
                self.resolve_prompt(kind, value);
                self.needs_redraw = true;
            }
        }
    }

    fn resolve_prompt(&mut self, kind: PromptKind, value: String) {
        match kind {
            PromptKind::SaveFilename => self.save_to(value.trim()),
            PromptKind::ColorLiteral => {
                let literal = value.trim();
                // Single characters fall back to the quick color keys, so
                // "g" works as well as "green" or "#00ff00".
                let parsed = util::parse_color(literal).or_else(|| {
                    let mut chars = literal.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => util::key_to_color(c),
                        _ => None,
                    }
                });
                match parsed {
                    Some(color) => {
                        self.fg = color;
                        info!("Color set to {}", util::color_to_name(color));
                        self.status_message =
                            Some(format!("color: {}", util::color_to_name(color)));
                    }
                    None => {
                        warn!("Rejected color literal '{literal}'");
                        self.status_message = Some(format!("invalid color: {literal}"));
                    }
                }
            }
            PromptKind::ConfirmQuit => {
                self.should_exit = true;
            }
        }
    }

    fn save_to(&mut self, name: &str) {
        if name.is_empty() {
            self.status_message = Some("save aborted: empty filename".into());
            return;
        }
        let path = session::resolve_path(&self.export, name);
        match session::export_to_path(&self.buffer, &path) {
            Ok(format) => {
                self.dirty = false;
                info!("Saved {} as {}", path.display(), format.label());
                self.status_message = Some(format!("saved {}", path.display()));
            }
            Err(err) => {
                warn!("Save to {} failed: {err:#}", path.display());
                self.status_message = Some(format!("save failed: {err:#}"));
            }
        }
    }

    fn path_type_char(&mut self, c: char) {
        let fallback = self.cell_position();
        if let ActiveTool::PathType(tool) = &mut self.tool {
            tool.handle_char(&mut self.buffer, self.fg, fallback, c);
        }
    }

    /// Leaves the path tool back to the default paint tool. The typed
    /// glyphs remain, so the session is marked dirty.
    fn exit_path_type(&mut self) {
        self.switch_tool(ToolKind::Paint);
        self.dirty = true;
        self.needs_redraw = true;
    }
}
