//! CLI commands for data export and restore

use chrono::Local;
use clap::ValueEnum;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{self, LedgerExport};
use crate::storage::Storage;

use super::create_output;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (full ledger with metadata)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

/// Export the ledger; without `output` the file goes to the exports directory
pub fn handle_export_command(
    storage: &Storage,
    paths: &TrackerPaths,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> TrackerResult<()> {
    let output = match output {
        Some(path) => path,
        None => {
            let dir = paths.export_dir();
            fs::create_dir_all(&dir)?;
            dir.join(format!(
                "ledger-{}.{}",
                Local::now().format("%Y%m%d-%H%M%S"),
                format.extension()
            ))
        }
    };

    let mut writer = create_output(&output)?;

    match format {
        ExportFormat::Csv => {
            let count = export::export_transactions_csv(storage, &mut writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportFormat::Json => {
            export::export_full_json(storage, &mut writer, true)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            export::export_full_yaml(storage, &mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
    }
    writer.flush()?;

    Ok(())
}

/// Restore transactions from a JSON or YAML export
pub fn handle_import_command(storage: &Storage, file: &Path) -> TrackerResult<()> {
    let export = read_export(file)?;
    let count = export::restore(storage, &export)?;
    println!("Imported {} transactions from: {}", count, file.display());
    Ok(())
}

fn read_export(file: &Path) -> TrackerResult<LedgerExport> {
    let contents = fs::read_to_string(file).map_err(|e| {
        TrackerError::Io(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => export::parse_json(&contents),
        Some("yaml") | Some("yml") => export::parse_yaml(&contents),
        _ => Err(TrackerError::Validation(format!(
            "Cannot tell the format of {}. Use a .json, .yaml or .yml export",
            file.display()
        ))),
    }
}
