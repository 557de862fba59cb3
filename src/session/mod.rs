//! Saving and restoring drawings.
//!
//! Export backends are selected by file extension (`export`); the native
//! snapshot format (`snapshot`) loads back losslessly.

pub mod export;
pub mod snapshot;


pub use export::{ExportFormat, default_filename, export_to_path, render_ansi, render_html,
    resolve_path};
pub use snapshot::SnapshotError;
