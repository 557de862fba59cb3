//! Export backends, selected by output file extension.
//!
//! `.html` renders a self-contained HTML page, `.csnap` the native snapshot
//! serialization; every other extension falls back to plain ANSI-sequence
//! text, the default interchange format.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::{CellBuffer, Color};
use crate::config::ExportConfig;

use super::snapshot;

/// Output format derived from a path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text with ANSI color sequences (default).
    Ansi,
    /// Self-contained HTML page.
    Html,
    /// Native snapshot (gzipped JSON), loadable back.
    Snapshot,
}

impl ExportFormat {
    /// Picks the format for `path`; unrecognized extensions export as ANSI.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("html") | Some("htm") => ExportFormat::Html,
            Some("csnap") => ExportFormat::Snapshot,
            _ => ExportFormat::Ansi,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Ansi => "ansi",
            ExportFormat::Html => "html",
            ExportFormat::Snapshot => "snapshot",
        }
    }
}

/// Expands the configured filename template with the current time.
pub fn default_filename(template: &str) -> String {
    Local::now().format(template).to_string()
}

/// Resolves a filename typed at the save prompt against the configured
/// export directory. Absolute paths win; without a configured directory,
/// relative names land in the working directory.
pub fn resolve_path(export: &ExportConfig, name: &str) -> PathBuf {
    let candidate = PathBuf::from(name);
    if candidate.is_absolute() {
        return candidate;
    }
    match &export.save_directory {
        Some(dir) => dir.join(candidate),
        None => candidate,
    }
}

/// Exports `buffer` to `path` in the format selected by its extension.
/// Returns the chosen format.
pub fn export_to_path(buffer: &CellBuffer, path: &Path) -> Result<ExportFormat> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create export directory {}", parent.display())
            })?;
        }
    }

    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Ansi => {
            fs::write(path, render_ansi(buffer))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        ExportFormat::Html => {
            fs::write(path, render_html(buffer))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        ExportFormat::Snapshot => snapshot::save(buffer, path)?,
    }
    Ok(format)
}

/// Renders the buffer as ANSI text: one line per canvas row, truecolor SGR
/// sequences only where the foreground changes, reset at each line end.
pub fn render_ansi(buffer: &CellBuffer) -> String {
    let mut out = String::new();
    for row in buffer.rows() {
        let mut current: Option<Color> = None;
        for cell in row {
            if cell.is_blank() {
                out.push(' ');
                continue;
            }
            if current != Some(cell.fg) {
                out.push_str(&format!(
                    "\x1b[38;2;{};{};{}m",
                    cell.fg.r, cell.fg.g, cell.fg.b
                ));
                current = Some(cell.fg);
            }
            out.push(cell.ch);
        }
        if current.is_some() {
            out.push_str("\x1b[0m");
        }
        out.push('\n');
    }
    out
}

/// Renders the buffer as a dark-background HTML page.
pub fn render_html(buffer: &CellBuffer) -> String {
    let mut out = String::new();
    out.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\nbody { background: #000; }\n\
         pre { font-family: monospace; line-height: 1; }\n</style>\n\
         </head>\n<body>\n<pre>\n",
    );
    for row in buffer.rows() {
        for cell in row {
            if cell.is_blank() {
                out.push(' ');
            } else {
                out.push_str(&format!(
                    "<span style=\"color:#{:02x}{:02x}{:02x}\">{}</span>",
                    cell.fg.r,
                    cell.fg.g,
                    cell.fg.b,
                    escape_html(cell.ch)
                ));
            }
        }
        out.push('\n');
    }
    out.push_str("</pre>\n</body>\n</html>\n");
    out
}

fn escape_html(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        other => other.to_string(),
    }
}
