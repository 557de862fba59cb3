//! Native snapshot serialization.
//!
//! A snapshot is a versioned, gzip-compressed JSON file recording the
//! canvas dimensions and every non-blank cell. It is the only export format
//! that loads back losslessly.

use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::canvas::{Cell, CellBuffer, Color};
use crate::util::Pos;

const CURRENT_VERSION: u32 = 1;

/// Snapshot decoding failures beyond plain I/O.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0} (newest supported: {CURRENT_VERSION})")]
    UnsupportedVersion(u32),
    #[error("snapshot declares invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// One stored non-blank cell.
#[derive(Debug, Serialize, Deserialize)]
struct CellRecord {
    x: i32,
    y: i32,
    ch: char,
    fg: Color,
    bg: Color,
}

/// On-disk snapshot layout.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    last_modified: String,
    width: i32,
    height: i32,
    cells: Vec<CellRecord>,
}

/// Writes `buffer` to `path` as a gzipped JSON snapshot.
///
/// The file is exclusively locked for the duration of the write so a
/// concurrent load never observes a half-written snapshot.
pub fn save(buffer: &CellBuffer, path: &Path) -> Result<()> {
    let snapshot = SnapshotFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        width: buffer.width(),
        height: buffer.height(),
        cells: collect_cells(buffer),
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to lock snapshot {}", path.display()))?;

    let mut encoder = GzEncoder::new(&file, Compression::default());
    serde_json::to_writer(&mut encoder, &snapshot)
        .with_context(|| format!("Failed to encode snapshot {}", path.display()))?;
    encoder
        .finish()
        .and_then(|mut f| f.flush())
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    FileExt::unlock(&file).ok();

    info!(
        "Saved snapshot {} ({} cells)",
        path.display(),
        snapshot.cells.len()
    );
    Ok(())
}

/// Loads a snapshot back into a fresh cell buffer.
pub fn load(path: &Path) -> Result<CellBuffer> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut raw = String::new();
    decoder
        .read_to_string(&mut raw)
        .with_context(|| format!("Failed to decompress snapshot {}", path.display()))?;

    let snapshot: SnapshotFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    if snapshot.version > CURRENT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version).into());
    }
    if snapshot.width <= 0 || snapshot.height <= 0 {
        return Err(SnapshotError::InvalidDimensions {
            width: snapshot.width,
            height: snapshot.height,
        }
        .into());
    }

    debug!(
        "Loaded snapshot {} ({}x{}, {} cells, saved {})",
        path.display(),
        snapshot.width,
        snapshot.height,
        snapshot.cells.len(),
        snapshot.last_modified
    );

    Ok(CellBuffer::with_contents(
        snapshot.width,
        snapshot.height,
        snapshot.cells.into_iter().map(|record| {
            (
                Pos::new(record.x, record.y),
                Cell {
                    ch: record.ch,
                    fg: record.fg,
                    bg: record.bg,
                },
            )
        }),
    ))
}

fn collect_cells(buffer: &CellBuffer) -> Vec<CellRecord> {
    let mut cells = Vec::new();
    for (y, row) in buffer.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if !cell.is_blank() {
                cells.push(CellRecord {
                    x: x as i32,
                    y: y as i32,
                    ch: cell.ch,
                    fg: cell.fg,
                    bg: cell.bg,
                });
            }
        }
    }
    cells
}
