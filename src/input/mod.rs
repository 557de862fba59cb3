//! Input handling and the tool state machine.
//!
//! This module translates backend keyboard and mouse events into painting
//! actions. It maintains the current tool, resolution, cursor position and
//! stroke state, and manages modal prompts.

pub mod events;
pub mod modifiers;
pub mod painter;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Buttons, Key, MouseButton};
pub use modifiers::Modifiers;
pub use painter::{ActiveTool, Painter};
pub use tool::ToolKind;
