//! JSON ingestion: a top-level array of objects, or an object wrapping the
//! array under `entries`, `data` or `timeEntries`. Field names are resolved
//! through a synonym table so exports from common billing systems load
//! without remapping.

use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::utils::text::parse_decimal;

/// One raw record before entry construction (shared with the tabular path).
#[derive(Debug, Default, Clone)]
pub struct RawRecord {
    pub date: String,
    pub attorney: String,
    pub description: String,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
    pub code: String,
}

const DATE_KEYS: [&str; 6] = [
    "date",
    "entryDate",
    "entry_date",
    "serviceDate",
    "service_date",
    "workDate",
];
const ATTORNEY_KEYS: [&str; 6] = [
    "attorney",
    "timekeeper",
    "billedBy",
    "billed_by",
    "lawyer",
    "name",
];
const DESCRIPTION_KEYS: [&str; 5] = ["description", "narrative", "details", "task", "services"];
const HOURS_KEYS: [&str; 4] = ["hours", "hrs", "duration", "time"];
const RATE_KEYS: [&str; 5] = ["rate", "hourlyRate", "hourly_rate", "billingRate", "billing_rate"];
const AMOUNT_KEYS: [&str; 4] = ["amount", "total", "fees", "value"];
const CODE_KEYS: [&str; 5] = ["code", "utbmsCode", "utbms_code", "taskCode", "task_code"];

fn string_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    for k in keys {
        match obj.get(*k) {
            Some(Value::String(s)) => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn number_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<f64> {
    for k in keys {
        match obj.get(*k) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Some(v) = parse_decimal(s) {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse JSON input into raw records. Non-object array items are skipped;
/// a document with no recognizable array form is an ingestion error.
pub fn parse_records(raw: &str) -> AppResult<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::Ingest(format!("invalid JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => ["entries", "data", "timeEntries"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array).cloned())
            .ok_or_else(|| {
                AppError::Ingest(
                    "JSON object has no 'entries', 'data' or 'timeEntries' array".to_string(),
                )
            })?,
        _ => {
            return Err(AppError::Ingest(
                "JSON input must be an array of entries or an object wrapping one".to_string(),
            ));
        }
    };

    let mut records = Vec::new();
    for item in items {
        let Value::Object(obj) = item else { continue };
        records.push(RawRecord {
            date: string_field(&obj, &DATE_KEYS),
            attorney: string_field(&obj, &ATTORNEY_KEYS),
            description: string_field(&obj, &DESCRIPTION_KEYS),
            hours: number_field(&obj, &HOURS_KEYS),
            rate: number_field(&obj, &RATE_KEYS),
            amount: number_field(&obj, &AMOUNT_KEYS),
            code: string_field(&obj, &CODE_KEYS),
        });
    }

    Ok(records)
}
