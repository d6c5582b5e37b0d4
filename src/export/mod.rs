//! Writes collected records to disk in the canonical JSON shape.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::model::FilmingLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// One pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct ExportStats {
    pub records: usize,
    pub file_size_bytes: u64,
}

pub fn export(
    records: &[FilmingLocation],
    output_path: &Path,
    format: ExportFormat,
) -> Result<ExportStats> {
    match format {
        ExportFormat::Json => export_json(records, output_path),
        ExportFormat::Jsonl => export_jsonl(records, output_path),
    }
}

/// Export records as a pretty-printed JSON array.
pub fn export_json(records: &[FilmingLocation], output_path: &Path) -> Result<ExportStats> {
    debug!(count = records.len(), path = %output_path.display(), "exporting JSON");

    let file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(file, records)?;

    finish(records.len(), output_path, "JSON")
}

/// Export records as JSON Lines.
pub fn export_jsonl(records: &[FilmingLocation], output_path: &Path) -> Result<ExportStats> {
    debug!(count = records.len(), path = %output_path.display(), "exporting JSONL");

    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    std::fs::write(output_path, output)?;

    finish(records.len(), output_path, "JSONL")
}

fn finish(count: usize, output_path: &Path, label: &str) -> Result<ExportStats> {
    let file_size = std::fs::metadata(output_path)?.len();
    info!(
        "{} export completed: {} records, {} bytes",
        label, count, file_size
    );
    Ok(ExportStats {
        records: count,
        file_size_bytes: file_size,
    })
}
