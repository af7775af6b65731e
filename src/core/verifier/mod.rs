//! The verification pipeline.
//!
//! `run_pipeline` is a pure, synchronous, single forward pass over the
//! batch: input entries are never mutated, all accumulators are local to
//! the call, and re-running with the same input yields identical output.
//! Order matters: the day-total and duplicate checks accumulate state in
//! input sequence order.

pub mod flags;
pub mod quality;
pub mod rounding;
pub mod split;
pub mod utbms;

use crate::models::entry::TimeEntry;
use crate::models::flag::{Confidence, Severity};
use crate::models::settings::VerifierSettings;

/// Derive the confidence tier from the flags and issues of one entry.
/// Computed last, after every check has run.
fn confidence_for(entry: &TimeEntry) -> Confidence {
    let errors = entry
        .flags
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = entry
        .flags
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .count();

    if errors > 0 || warnings >= 3 {
        Confidence::Low
    } else if warnings >= 1 || entry.quality_issues.len() >= 2 {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

fn classify_entry(entry: &mut TimeEntry, settings: &VerifierSettings) {
    // A code supplied by the source row wins over pattern classification.
    let from_source = (!entry.source_code.is_empty())
        .then(|| utbms::lookup(&entry.source_code))
        .flatten();

    if let Some(code) = from_source.or_else(|| utbms::classify(&entry.description)) {
        entry.utbms_code = Some(code.code.to_string());
        entry.utbms_phase = Some(code.phase.to_string());
        entry.utbms_task = Some(code.task.to_string());
    }

    if settings.detect_activities {
        let (code, _label) = utbms::classify_activity(&entry.description);
        entry.utbms_activity = Some(code.to_string());
    }
}

/// Run the full analysis pass and return a new annotated batch.
///
/// Never fails: malformed entries skip the checks that cannot apply to
/// them and the batch always completes.
pub fn run_pipeline(entries: &[TimeEntry], settings: &VerifierSettings) -> Vec<TimeEntry> {
    let mut state = flags::DayState::default();

    entries
        .iter()
        .map(|source| {
            let mut entry = source.clone();
            entry.clear_annotations();

            flags::apply(&mut entry, settings, &mut state);

            if settings.check_quality {
                entry.quality_issues = quality::check_description(&entry.description, settings);
            }

            if settings.detect_codes {
                classify_entry(&mut entry, settings);
            }

            if settings.suggest_splits {
                let suggestion = split::suggest(&entry);
                entry.split_suggestion = suggestion;
            }

            rounding::apply_adjustments(&mut entry, settings);

            entry.confidence = confidence_for(&entry);
            entry
        })
        .collect()
}
