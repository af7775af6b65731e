// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{EntryExport, entry_to_row, get_headers};
use crate::export::notify_export_success;
use crate::models::entry::TimeEntry;
use crate::models::settings::VerifierSettings;
use crate::models::summary::BatchSummary;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// JSON export: full annotated entries plus summary, settings and a
/// timestamp, pretty-printed.
pub(crate) fn export_json(
    entries: &[TimeEntry],
    summary: &BatchSummary,
    settings: &VerifierSettings,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let document = serde_json::json!({
        "entries": entries,
        "summary": summary,
        "settings": settings,
        "exported_at": chrono::Local::now().to_rfc3339(),
    });

    let json_data = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV export: the fixed 14-column schema, header row first.
pub(crate) fn export_csv(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    wtr.write_record(get_headers())
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for item in entries {
        wtr.write_record(entry_to_row(item))
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}
