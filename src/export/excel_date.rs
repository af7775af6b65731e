// src/export/excel_date.rs

use crate::utils::date::parse_entry_date;
use chrono::NaiveDate;

/// Try to interpret a string as a calendar date, returning the Excel
/// serial plus its number format. Loose entry-date spellings are accepted
/// so exported sheets sort and filter on real dates.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let d = parse_entry_date(s)?;
    Some(("yyyy-mm-dd", naive_date_to_excel_serial(d)))
}

fn naive_date_to_excel_serial(d: NaiveDate) -> f64 {
    // Excel's day zero (with the 1900 leap-year quirk already folded in)
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    (d - excel_epoch).num_days() as f64
}
