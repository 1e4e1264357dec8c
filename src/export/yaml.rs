//! YAML export of the whole ledger, for human-readable backups

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::LedgerExport;
use crate::storage::Storage;

/// Export the full ledger to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> TrackerResult<()> {
    let export = LedgerExport::from_storage(storage)?;

    writeln!(writer, "# Money Tracker ledger export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "#")?;
    writeln!(writer, "# Restore with: money import <this file>")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn parse_yaml(yaml_str: &str) -> TrackerResult<LedgerExport> {
    let export: LedgerExport = serde_yaml::from_str(yaml_str)?;
    export.validate().map_err(TrackerError::Validation)?;
    Ok(export)
}
