// src/export/model.rs

use crate::models::entry::TimeEntry;

/// Flat per-entry record backing the fixed 14-column export schema.
#[derive(Clone, Debug)]
pub struct EntryExport {
    pub date: String,
    pub attorney: String,
    pub description: String,
    pub hours: f64,
    pub rounded_hours: f64,
    pub rate: f64,
    pub amount: f64,
    pub adjusted_amount: f64,
    pub utbms_code: String,
    pub phase: String,
    pub confidence: String,
    pub flags: String,
    pub quality_issues: String,
    pub approved: String,
}

impl From<&TimeEntry> for EntryExport {
    fn from(e: &TimeEntry) -> Self {
        Self {
            date: e.date.clone(),
            attorney: e.attorney.clone(),
            description: e.description.clone(),
            hours: e.hours,
            rounded_hours: e.rounded_hours,
            rate: e.rate,
            amount: e.amount,
            adjusted_amount: e.adjusted_amount,
            utbms_code: e.utbms_code.clone().unwrap_or_default(),
            phase: e.utbms_phase.clone().unwrap_or_default(),
            confidence: e.confidence.to_db_str().to_string(),
            flags: e.flags_joined(),
            quality_issues: e.quality_joined(),
            approved: if e.approved { "Yes" } else { "No" }.to_string(),
        }
    }
}

/// Header for CSV / XLSX. Fixed contract: 14 columns, this order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "Date",
        "Attorney",
        "Description",
        "Hours",
        "Rounded Hours",
        "Rate",
        "Amount",
        "Adjusted Amount",
        "UTBMS Code",
        "Phase",
        "Confidence",
        "Flags",
        "Quality Issues",
        "Approved",
    ]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.attorney.clone(),
        e.description.clone(),
        format!("{:.2}", e.hours),
        format!("{:.2}", e.rounded_hours),
        format!("{:.2}", e.rate),
        format!("{:.2}", e.amount),
        format!("{:.2}", e.adjusted_amount),
        e.utbms_code.clone(),
        e.phase.clone(),
        e.confidence.clone(),
        e.flags.clone(),
        e.quality_issues.clone(),
        e.approved.clone(),
    ]
}

pub(crate) fn entries_to_table(entries: &[EntryExport]) -> Vec<Vec<String>> {
    entries.iter().map(entry_to_row).collect()
}

/// Compact column set for the PDF report; the long narrative gets the
/// remaining width and flags render as an annotation line under the row.
pub(crate) fn pdf_headers() -> Vec<&'static str> {
    vec![
        "Date", "Attorney", "Description", "Hours", "Rnd", "Rate", "Adjusted", "Code", "Conf",
    ]
}

pub(crate) fn entry_to_pdf_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.attorney.clone(),
        e.description.clone(),
        format!("{:.2}", e.hours),
        format!("{:.2}", e.rounded_hours),
        format!("{:.2}", e.rate),
        format!("{:.2}", e.adjusted_amount),
        e.utbms_code.clone(),
        e.confidence.clone(),
    ]
}
