//! Threshold and anomaly flags.
//!
//! `DayState` is the per-pass accumulator: running day totals and the
//! duplicate hash set live only for one pipeline invocation and are
//! discarded with it. The checks themselves are total functions: a
//! malformed entry (unparseable date, zero rate) skips the dependent
//! check and the pass continues.

use std::collections::HashMap;

use crate::models::entry::TimeEntry;
use crate::models::flag::{Flag, FlagKind, Severity};
use crate::models::settings::VerifierSettings;
use crate::utils::date;
use crate::utils::text::{prefix_chars, word_count};

use super::quality;
use super::rounding;

// |rounded - raw| above this raises the excessive-rounding flag.
const ROUNDING_TOLERANCE: f64 = 0.15;

const BLOCK_BILLING_MAX_WORDS: usize = 4;
const BLOCK_BILLING_MIN_HOURS: f64 = 2.0;

const DUPLICATE_PREFIX_CHARS: usize = 50;

/// Accumulators for one pipeline pass, constructed fresh per call.
#[derive(Default)]
pub struct DayState {
    /// (date, attorney) → running hours. Never reset within a batch: the
    /// day-total flag re-fires on every entry past the threshold.
    day_hours: HashMap<String, f64>,
    /// duplicate hash → id of the first entry that produced it.
    seen: HashMap<String, String>,
}

fn day_key(entry: &TimeEntry) -> String {
    format!("{}|{}", entry.date, entry.attorney.to_lowercase())
}

fn duplicate_key(entry: &TimeEntry) -> String {
    format!(
        "{}|{}|{}",
        entry.date,
        entry.attorney.to_lowercase(),
        prefix_chars(&entry.description.to_lowercase(), DUPLICATE_PREFIX_CHARS)
    )
}

/// Apply every anomaly check to one entry, in a fixed order. Also computes
/// `rounded_hours`, which the rounding-delta flag depends on.
pub fn apply(entry: &mut TimeEntry, settings: &VerifierSettings, state: &mut DayState) {
    // Long entry
    if entry.hours > settings.long_threshold {
        entry.flags.push(Flag::new(
            FlagKind::LongEntry,
            Severity::Warning,
            format!(
                "{:.1} hours in a single entry (threshold {:.1})",
                entry.hours, settings.long_threshold
            ),
        ));
    }

    // Day total: running sum per (date, attorney)
    let total = state.day_hours.entry(day_key(entry)).or_insert(0.0);
    *total += entry.hours;
    if settings.day_threshold > 0.0 && *total > settings.day_threshold {
        entry.flags.push(Flag::new(
            FlagKind::DayTotal,
            Severity::Warning,
            format!(
                "Day total for {} on {} reaches {:.1} hours (cap {:.1})",
                entry.attorney, entry.date, *total, settings.day_threshold
            ),
        ));
    }

    // Minimum entry (only when a minimum is configured)
    if settings.minimum_entry > 0.0 && entry.hours < settings.minimum_entry {
        entry.flags.push(Flag::new(
            FlagKind::MinimumEntry,
            Severity::Info,
            format!(
                "{:.2} hours is below the minimum billable entry of {:.2}",
                entry.hours, settings.minimum_entry
            ),
        ));
    }

    // Rounding delta
    entry.rounded_hours = rounding::round_hours(
        entry.hours,
        settings.rounding_increment,
        settings.rounding_direction,
    );
    if (entry.rounded_hours - entry.hours).abs() > ROUNDING_TOLERANCE {
        entry.flags.push(Flag::new(
            FlagKind::Rounding,
            Severity::Warning,
            format!(
                "Rounding changes {:.2} to {:.2} hours",
                entry.hours, entry.rounded_hours
            ),
        ));
    }

    // Block billing: large time behind a terse narrative
    if word_count(&entry.description) < BLOCK_BILLING_MAX_WORDS
        && entry.hours >= BLOCK_BILLING_MIN_HOURS
    {
        entry.flags.push(Flag::new(
            FlagKind::BlockBilling,
            Severity::Warning,
            format!(
                "{:.1} hours with a {}-word description suggests block billing",
                entry.hours,
                word_count(&entry.description)
            ),
        ));
    }

    // Duplicate: same date, attorney and description prefix as an earlier
    // entry. The first occurrence is never flagged.
    if settings.check_duplicates {
        let key = duplicate_key(entry);
        match state.seen.get(&key) {
            Some(first_id) => {
                entry.flags.push(Flag::new(
                    FlagKind::Duplicate,
                    Severity::Error,
                    format!("Possible duplicate of entry {}", first_id),
                ));
            }
            None => {
                state.seen.insert(key, entry.id.clone());
            }
        }
    }

    // Weekend / holiday (skipped when the date does not parse)
    if settings.check_weekend_holiday
        && let Some(d) = entry.parsed_date()
    {
        if date::is_weekend(d) {
            entry.flags.push(Flag::new(
                FlagKind::Weekend,
                Severity::Info,
                format!("Work dated on a weekend ({})", d.format("%A")),
            ));
        } else if let Some(name) = date::us_federal_holiday(d) {
            entry.flags.push(Flag::new(
                FlagKind::Holiday,
                Severity::Info,
                format!("Work dated on {}", name),
            ));
        }
    }

    // Vague narrative, also surfaced as a quality issue when the quality
    // checker runs. Both outputs are intentional: the flag feeds filtering,
    // the issue carries the rewrite suggestion.
    if quality::is_vague(&entry.description) {
        entry.flags.push(Flag::new(
            FlagKind::Vague,
            Severity::Warning,
            "Description is too vague to support the charge".to_string(),
        ));
    }

    // Travel at reduced rate
    if settings.travel_multiplier < 1.0 && rounding::is_travel(&entry.description) {
        entry.flags.push(Flag::new(
            FlagKind::Travel,
            Severity::Info,
            format!(
                "Travel time billed at {:.0}% of the standard rate",
                settings.travel_multiplier * 100.0
            ),
        ));
    }
}
