// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn range_err(msg: &str) -> AppError {
    AppError::from(std::io::Error::other(msg.to_string()))
}

fn month_last_day(y: i32, m: u32) -> Option<NaiveDate> {
    let first_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)?
    };
    first_next.pred_opt()
}

/// Expand one period token into its inclusive date bounds:
/// `YYYY` → whole year, `YYYY-MM` → whole month, `YYYY-MM-DD` → that day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| range_err("invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| range_err("invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| range_err("invalid year"))?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| range_err("invalid month"))?;
            let d2 = month_last_day(d1.year(), d1.month())
                .ok_or_else(|| range_err("invalid month"))?;
            Ok((d1, d2))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| range_err("invalid date"))?;
            Ok((d, d))
        }
        _ => Err(range_err("unsupported --range format")),
    }
}

/// Parse a `--range` expression into inclusive bounds.
///
/// Accepted forms:
/// - `YYYY`
/// - `YYYY-MM`
/// - `YYYY-MM-DD`
/// - any of the above pairs joined by `:` (`YYYY-MM:YYYY-MM`, ...)
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(range_err("start and end must have same format"));
        }

        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;

        if d2 < d1 {
            return Err(range_err("range end precedes range start"));
        }
        Ok((d1, d2))
    } else {
        period_bounds(r.trim())
    }
}
