//! Batch and daily roll-ups. Pure reductions over the current entry state,
//! recomputed whenever requested.

use std::collections::BTreeMap;

use crate::models::entry::TimeEntry;
use crate::models::flag::Confidence;
use crate::models::settings::VerifierSettings;
use crate::models::summary::{BatchSummary, DailySummary};

pub fn build_batch_summary(entries: &[TimeEntry]) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for e in entries {
        summary.total_entries += 1;
        if e.is_flagged() {
            summary.flagged_entries += 1;
        }
        if e.approved {
            summary.approved_entries += 1;
        }
        if e.write_off {
            summary.written_off += 1;
        }

        summary.total_hours += e.hours;
        summary.total_amount += e.amount;
        summary.adjusted_hours += e.adjusted_hours;
        summary.adjusted_amount += e.adjusted_amount;

        match e.confidence {
            Confidence::High => summary.high_confidence += 1,
            Confidence::Medium => summary.medium_confidence += 1,
            Confidence::Low => summary.low_confidence += 1,
        }

        if e.utbms_code.is_some() {
            summary.coded_entries += 1;
        }
    }

    summary.rounding_delta_hours = summary.adjusted_hours - summary.total_hours;
    summary
}

/// One roll-up per distinct entry date, ordered by the raw date string
/// (ISO dates therefore sort chronologically).
pub fn build_daily_summaries(
    entries: &[TimeEntry],
    settings: &VerifierSettings,
) -> Vec<DailySummary> {
    let mut days: BTreeMap<String, DailySummary> = BTreeMap::new();

    for e in entries {
        let day = days.entry(e.date.clone()).or_insert_with(|| DailySummary {
            date: e.date.clone(),
            entries: 0,
            hours: 0.0,
            amount: 0.0,
            flag_count: 0,
            over_threshold: false,
        });
        day.entries += 1;
        day.hours += e.hours;
        day.amount += e.amount;
        day.flag_count += e.flags.len();
    }

    let mut out: Vec<DailySummary> = days.into_values().collect();
    for day in &mut out {
        day.over_threshold = settings.day_threshold > 0.0 && day.hours > settings.day_threshold;
    }
    out
}
