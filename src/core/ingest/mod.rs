//! Ingestion boundary: raw file text → filtered, normalized `TimeEntry`
//! batch. This is the only layer allowed to fail with a user-facing error;
//! everything past it degrades per entry instead of failing.

pub mod columns;
pub mod json;
pub mod table;

use clap::ValueEnum;
use std::collections::HashMap;

use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::models::settings::VerifierSettings;
use crate::utils::date;
use crate::utils::text::parse_decimal;
use columns::Role;
use json::RawRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum InputFormat {
    #[default]
    Auto,
    Csv,
    Tsv,
    Json,
    Text,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Csv => "csv",
            InputFormat::Tsv => "tsv",
            InputFormat::Json => "json",
            InputFormat::Text => "text",
        }
    }
}

/// Sniff the concrete format when the caller declared `auto`.
fn resolve_format(raw: &str, declared: InputFormat) -> InputFormat {
    if declared != InputFormat::Auto {
        return declared;
    }
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return InputFormat::Json;
    }
    let first_line = raw.lines().next().unwrap_or("");
    if first_line.contains('\t') {
        InputFormat::Tsv
    } else if first_line.contains(',') {
        InputFormat::Csv
    } else {
        InputFormat::Text
    }
}

// Positional fallbacks for undetected columns. Best-effort policy: a file
// without recognizable headers still loads as date,attorney,description,
// hours,rate.
const FALLBACK_DATE: usize = 0;
const FALLBACK_ATTORNEY: usize = 1;
const FALLBACK_DESCRIPTION: usize = 2;
const FALLBACK_HOURS: usize = 3;
const FALLBACK_RATE: usize = 4;

fn cell<'a>(row: &'a [String], roles: &HashMap<Role, usize>, role: Role, fallback: Option<usize>) -> &'a str {
    let idx = roles.get(&role).copied().or(fallback);
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

fn record_from_row(row: &[String], roles: &HashMap<Role, usize>) -> RawRecord {
    RawRecord {
        date: cell(row, roles, Role::Date, Some(FALLBACK_DATE)).trim().to_string(),
        attorney: cell(row, roles, Role::Attorney, Some(FALLBACK_ATTORNEY))
            .trim()
            .to_string(),
        description: cell(row, roles, Role::Description, Some(FALLBACK_DESCRIPTION))
            .trim()
            .to_string(),
        hours: parse_decimal(cell(row, roles, Role::Hours, Some(FALLBACK_HOURS))),
        rate: parse_decimal(cell(row, roles, Role::Rate, Some(FALLBACK_RATE))),
        amount: parse_decimal(cell(row, roles, Role::Amount, None)),
        code: cell(row, roles, Role::Code, None).trim().to_string(),
    }
}

fn records_from_table(raw: &str, delim: char) -> AppResult<Vec<RawRecord>> {
    let rows = table::parse_delimited(raw, delim);
    if rows.len() < 2 {
        return Err(AppError::Ingest(
            "expected a header row and at least one data row".to_string(),
        ));
    }

    let roles = columns::detect_roles(&rows[0]);
    Ok(rows[1..]
        .iter()
        .map(|row| record_from_row(row, &roles))
        .collect())
}

/// Plain-text fallback: one entry per non-blank line. Lines with fewer than
/// four fields keep the whole line as the description; such entries carry no
/// hours and are dropped by the validity filter below. A leading header
/// line, when recognizable, is skipped.
fn records_from_text(raw: &str) -> Vec<RawRecord> {
    let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();

    let skip_header = lines
        .first()
        .map(|line| {
            let delim = if line.contains('\t') { '\t' } else { ',' };
            columns::looks_like_header(&table::split_line(line, delim))
        })
        .unwrap_or(false);

    lines
        .into_iter()
        .skip(if skip_header { 1 } else { 0 })
        .map(|line| {
            let delim = if line.contains('\t') { '\t' } else { ',' };
            let fields = table::split_line(line, delim);
            if fields.len() >= 4 {
                RawRecord {
                    date: fields[0].trim().to_string(),
                    attorney: fields[1].trim().to_string(),
                    description: fields[2].trim().to_string(),
                    hours: parse_decimal(&fields[3]),
                    rate: fields.get(4).and_then(|f| parse_decimal(f)),
                    amount: None,
                    code: String::new(),
                }
            } else {
                RawRecord {
                    description: line.trim().to_string(),
                    ..RawRecord::default()
                }
            }
        })
        .collect()
}

/// Keep only entries inside the configured date window. Entries whose date
/// does not parse are kept: the window only applies where a calendar date
/// is known.
fn within_date_window(entry: &TimeEntry, settings: &VerifierSettings) -> bool {
    let Some(d) = entry.parsed_date() else {
        return true;
    };
    if let Some(from) = settings.date_from.as_deref().and_then(date::parse_date)
        && d < from
    {
        return false;
    }
    if let Some(to) = settings.date_to.as_deref().and_then(date::parse_date)
        && d > to
    {
        return false;
    }
    true
}

/// Parse raw file content into a validated entry batch.
///
/// Fails (with a single diagnostic, nothing partially loaded) when the file
/// is empty, a tabular file has no data rows, or filtering leaves no entry
/// with positive hours and a description.
pub fn parse_input(
    raw: &str,
    declared: InputFormat,
    settings: &VerifierSettings,
) -> AppResult<Vec<TimeEntry>> {
    if raw.trim().is_empty() {
        return Err(AppError::Ingest("input file is empty".to_string()));
    }

    let format = resolve_format(raw, declared);
    let records = match format {
        InputFormat::Json => json::parse_records(raw)?,
        InputFormat::Csv => records_from_table(raw, ',')?,
        InputFormat::Tsv => records_from_table(raw, '\t')?,
        InputFormat::Text => records_from_text(raw),
        InputFormat::Auto => unreachable!("format resolved above"),
    };

    let mut entries: Vec<TimeEntry> = Vec::new();
    for (i, rec) in records.into_iter().enumerate() {
        let hours = rec.hours.unwrap_or(0.0);
        let rate = rec.rate.filter(|r| *r > 0.0).unwrap_or(settings.hourly_rate);
        let mut entry = TimeEntry::from_row(
            format!("E{:04}", i + 1),
            rec.date,
            rec.attorney,
            rec.description,
            hours,
            rate,
            rec.amount,
        );
        entry.source_code = rec.code;
        entries.push(entry);
    }

    entries.retain(|e| e.hours > 0.0 && !e.description.is_empty());
    entries.retain(|e| within_date_window(e, settings));

    if entries.is_empty() {
        return Err(AppError::Ingest(
            "no valid entries found (each entry needs positive hours and a description)"
                .to_string(),
        ));
    }

    Ok(entries)
}
