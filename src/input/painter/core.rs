//! Painter controller state.
//!
//! One owned struct centralizes everything the event handlers touch: the
//! cell buffer, the logical cursor position, the active tool and
//! resolution, stroke state, the modal prompt and the dirty flag. Handlers
//! in `keys.rs` and `mouse.rs` mutate it through `&mut self`; nothing lives
//! in ambient state.

use std::collections::HashMap;

use log::{debug, info};

use crate::canvas::{Cell, CellBuffer, Color, FULL_BLOCK, Resolution};
use crate::config::{Action, ExportConfig, KeyBinding};
use crate::input::modifiers::Modifiers;
use crate::input::tool::ToolKind;
use crate::util::Pos;

use super::brush::BrushTool;
use super::path_type::PathTypeTool;
use super::prompt::Prompt;
use super::stroke::StrokeCoordinator;

/// The active tool variant. Exactly one exists at a time; each variant owns
/// its state explicitly.
#[derive(Debug)]
pub enum ActiveTool {
    Paint(BrushTool),
    Erase(BrushTool),
    PathType(PathTypeTool),
}

impl ActiveTool {
    fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Paint => ActiveTool::Paint(BrushTool::new(false)),
            ToolKind::Erase => ActiveTool::Erase(BrushTool::new(true)),
            ToolKind::PathType => ActiveTool::PathType(PathTypeTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ActiveTool::Paint(_) => ToolKind::Paint,
            ActiveTool::Erase(_) => ToolKind::Erase,
            ActiveTool::PathType(_) => ToolKind::PathType,
        }
    }

    fn start(&mut self) {
        match self {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => brush.start(),
            ActiveTool::PathType(tool) => tool.start(),
        }
    }

    fn stop(&mut self) {
        match self {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => brush.stop(),
            ActiveTool::PathType(tool) => tool.stop(),
        }
    }
}

/// Main controller for the painting session.
pub struct Painter {
    /// The drawing surface.
    pub buffer: CellBuffer,
    /// Logical cursor position in the finest grid of the active resolution.
    pub pos: Pos,
    /// Active pixel density.
    pub resolution: Resolution,
    /// Active foreground color.
    pub fg: Color,
    /// The active tool.
    pub tool: ActiveTool,
    /// Stroke grouping and duplicate suppression.
    pub stroke: StrokeCoordinator,
    /// Open modal prompt, if any. While present it captures all key events.
    pub prompt: Option<Prompt>,
    /// Whether unsaved changes exist.
    pub dirty: bool,
    /// Whether the display needs to be redrawn.
    pub needs_redraw: bool,
    /// Whether the user requested to exit.
    pub should_exit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the status bar is visible.
    pub show_status_bar: bool,
    /// Transient message shown in the status area until the next one.
    pub status_message: Option<String>,
    /// Keybinding action map for lookup.
    pub(super) action_map: HashMap<KeyBinding, Action>,
    /// Export preferences (save directory, filename template).
    pub(super) export: ExportConfig,
    /// Undo depth and buffer revision captured at the last left press,
    /// used to retract a single click when it turns into a double-click.
    pub(super) press_mark: Option<(usize, u64)>,
}

impl Painter {
    /// Creates a controller in its initial state: paint tool, the given
    /// resolution, continuous painting off, clean.
    pub fn with_defaults(
        buffer: CellBuffer,
        fg: Color,
        resolution: Resolution,
        show_status_bar: bool,
        export: ExportConfig,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            buffer,
            pos: Pos::new(0, 0),
            resolution,
            fg,
            tool: ActiveTool::for_kind(ToolKind::Paint),
            stroke: StrokeCoordinator::new(),
            prompt: None,
            dirty: false,
            needs_redraw: true,
            should_exit: false,
            show_help: false,
            show_status_bar,
            status_message: None,
            action_map,
            export,
            press_mark: None,
        }
    }

    /// Kind of the active tool.
    pub fn active_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Whether continuous painting is currently on (brush tools only).
    pub fn continuous_painting(&self) -> bool {
        match &self.tool {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => brush.continuous(),
            ActiveTool::PathType(_) => false,
        }
    }

    /// Cell address of the current logical position.
    pub fn cell_position(&self) -> Pos {
        self.resolution.to_cell_and_offset(self.pos).0
    }

    /// Sub-cell offset of the current logical position.
    pub fn sub_cell_offset(&self) -> Pos {
        self.resolution.to_cell_and_offset(self.pos).1
    }

    /// Switches the active tool, running the outgoing tool's `stop` and the
    /// incoming tool's `start`.
    ///
    /// Refused while a stroke is open: the tool under an open stroke must
    /// not be swapped out.
    pub fn switch_tool(&mut self, kind: ToolKind) {
        if self.stroke.is_open() {
            debug!("tool switch to {kind:?} ignored during open stroke");
            return;
        }
        if self.tool.kind() == kind {
            return;
        }
        self.tool.stop();
        self.tool = ActiveTool::for_kind(kind);
        self.tool.start();

        // The path tool is immediately seeded at the current cell so
        // keyboard-only sessions can start typing without a click.
        if let ActiveTool::PathType(tool) = &mut self.tool {
            let (cell, _) = self.resolution.to_cell_and_offset(self.pos);
            tool.toggle_point(&self.buffer, cell);
        }

        info!("Switched tool to {}", kind.label());
        self.needs_redraw = true;
    }

    /// Switches the pixel density, preserving the cell address of the
    /// cursor and snapping the sub-cell offset to the cell's top-left.
    pub fn switch_resolution(&mut self, resolution: Resolution) {
        if self.resolution == resolution {
            return;
        }
        self.pos = self.resolution.rebase(self.pos, resolution);
        self.resolution = resolution;
        info!("Switched resolution to {}", resolution.label());
        self.needs_redraw = true;
    }

    /// Moves the logical cursor by one step, clamped to the canvas.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let old = self.pos;
        self.pos = self
            .resolution
            .clamp(Pos::new(old.x + dx, old.y + dy), self.buffer.size());
        if self.pos != old {
            self.tick_position(old);
            self.needs_redraw = true;
        }
    }

    /// Notifies the active tool that the logical position changed.
    pub(super) fn tick_position(&mut self, old: Pos) {
        match &mut self.tool {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => {
                brush.position_changed(&mut self.buffer, self.resolution, self.fg, old, self.pos);
            }
            ActiveTool::PathType(tool) => {
                let (old_cell, _) = self.resolution.to_cell_and_offset(old);
                let (new_cell, _) = self.resolution.to_cell_and_offset(self.pos);
                tool.position_changed(&self.buffer, old_cell, new_cell);
            }
        }
    }

    /// Flood-fills at `cell` as its own undo group. The paint brush fills
    /// with the solid marker in the active color, the erase brush clears.
    pub(super) fn flood_fill_at(&mut self, cell: Pos) {
        if self.stroke.is_open() {
            return;
        }
        let fill = match &self.tool {
            ActiveTool::Erase(_) => Cell::BLANK,
            _ => Cell::glyph(FULL_BLOCK, self.fg),
        };
        self.buffer.undo_group_start();
        self.buffer.floodfill(cell, fill);
        self.buffer.undo_group_end();
    }

    /// Maps a terminal cell (mouse granularity) to a logical position at
    /// the cell's top-left sub-pixel, clamped to the canvas.
    pub(super) fn logical_for_cell(&self, cell: Pos) -> Pos {
        self.resolution
            .clamp(self.resolution.to_logical(cell, Pos::new(0, 0)), self.buffer.size())
    }

    /// Derives dirty/redraw state from buffer mutations observed across one
    /// event dispatch.
    pub(super) fn note_mutations(&mut self, revision_before: u64) {
        if self.buffer.revision() != revision_before {
            self.dirty = true;
            self.needs_redraw = true;
        }
    }

    /// Looks up the action bound to `key_name` under the given modifiers.
    pub(super) fn find_action(&self, key_name: &str, mods: Modifiers) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(key_name, mods.ctrl, mods.shift, mods.alt) {
                return Some(*action);
            }
        }
        None
    }
}
