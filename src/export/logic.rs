// src/export/logic.rs

use crate::config::Config;
use crate::core::summary::build_batch_summary;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::pdf_export::export_pdf;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::entry::TimeEntry;
use crate::models::settings::VerifierSettings;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::io;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export stored entries.
    ///
    /// - `format`: "csv" | "json" | "xlsx" | "pdf"
    /// - `file`: absolute output path
    /// - `batch`: export one stored batch (settings come from its snapshot)
    /// - `range`: alternatively, all entries dated inside `YYYY`,
    ///   `YYYY-MM`, `YYYY-MM-DD` or a `:`-joined span of those
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        batch: Option<i64>,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);
        let path = path.as_path();

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let (entries, settings, title) = load_selection(pool, cfg, batch, range)?;

        if entries.is_empty() {
            warning("⚠️  No entries found for selected range.");
            return Ok(());
        }

        let summary = build_batch_summary(&entries);
        let flat: Vec<EntryExport> = entries.iter().map(EntryExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&flat, path)?,
            ExportFormat::Json => export_json(&entries, &summary, &settings, path)?,
            ExportFormat::Xlsx => export_xlsx(&flat, path)?,
            ExportFormat::Pdf => export_pdf(&flat, path, &title)?,
        }

        if let Err(e) = ttlog(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} entries as {}", entries.len(), format.as_str()),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok(())
    }
}

/// Resolve the entry selection plus the settings and report title that go
/// with it.
fn load_selection(
    pool: &mut DbPool,
    cfg: &Config,
    batch: Option<i64>,
    range: &Option<String>,
) -> AppResult<(Vec<TimeEntry>, VerifierSettings, String)> {
    if let Some(batch_id) = batch {
        let row = queries::get_batch(pool, batch_id)?;
        let entries = queries::load_entries_by_batch(pool, batch_id)?;
        let settings: VerifierSettings =
            serde_yaml::from_str(&row.settings_yaml).unwrap_or_default();
        let title = report_title(&settings, &format!("batch {}", batch_id));
        return Ok((entries, settings, title));
    }

    let settings = cfg.verifier.clone();
    match range {
        None => Err(AppError::Export(
            "pass --batch N or --range to select entries".to_string(),
        )),
        Some(r) if r.eq_ignore_ascii_case("all") => {
            let batches = queries::load_batches(pool)?;
            let mut entries = Vec::new();
            for b in batches {
                entries.extend(queries::load_entries_by_batch(pool, b.id)?);
            }
            let title = report_title(&settings, "all entries");
            Ok((entries, settings, title))
        }
        Some(r) => {
            let (start, end) = parse_range(r)?;
            let entries = queries::load_entries_by_range(pool, start, end)?;
            let title = report_title(&settings, r);
            Ok((entries, settings, title))
        }
    }
}

fn report_title(settings: &VerifierSettings, scope: &str) -> String {
    if settings.firm_name.is_empty() {
        format!("Billing review: {}", scope)
    } else {
        format!("{} - billing review ({})", settings.firm_name, scope)
    }
}
