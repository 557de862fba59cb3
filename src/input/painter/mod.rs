//! The painting controller and its tools.
//!
//! [`Painter`] owns the session state and dispatches input events to the
//! active tool; the tools issue pixel operations against the canvas through
//! density-scoped views, inside undo groups managed by
//! [`StrokeCoordinator`].

mod brush;
mod core;
mod keys;
mod mouse;
mod path_type;
mod prompt;
mod stroke;

#[cfg(test)]
mod tests;

pub use brush::BrushTool;
pub use core::{ActiveTool, Painter};
pub use path_type::{PathMode, PathTypeTool};
pub use prompt::{Prompt, PromptEvent, PromptKind};
pub use stroke::StrokeCoordinator;
