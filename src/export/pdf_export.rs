// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{EntryExport, entry_to_pdf_row, pdf_headers};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// PDF report: compact entry table, flags rendered as an annotation line
/// under each flagged row.
pub(crate) fn export_pdf(entries: &[EntryExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = pdf_headers();
    let rows: Vec<Vec<String>> = entries.iter().map(entry_to_pdf_row).collect();
    let annotations: Vec<Option<String>> = entries
        .iter()
        .map(|e| {
            if e.flags.is_empty() {
                None
            } else {
                Some(format!("Flags: {}", e.flags))
            }
        })
        .collect();

    let mut pdf = PdfManager::new();
    pdf.write_report(title, &headers, &rows, &annotations);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}
