//! Split suggestions for multi-task narratives.
//!
//! The narrative is segmented on connector words and semicolons; short
//! fragments are discarded. A suggestion is only made for entries of at
//! least one hour with two or more substantive segments, dividing the
//! hours evenly.

use regex::RegexBuilder;
use std::sync::OnceLock;

use crate::models::entry::TimeEntry;
use crate::models::flag::{SplitPart, SplitSuggestion};

const CONNECTORS: &str = r";|\band\b|\balso\b|\badditionally\b|\bthen\b|\bfollowed by\b|\bas well as\b";

const MIN_SEGMENT_CHARS: usize = 10;
const MIN_SPLIT_HOURS: f64 = 1.0;

const SPLIT_REASON: &str =
    "Multiple discrete tasks detected in one entry; separate entries make the time spent on each task auditable";

fn connector_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(CONNECTORS)
            .case_insensitive(true)
            .build()
            .expect("invalid connector pattern")
    })
}

/// Propose a split for a multi-task entry, or nothing.
pub fn suggest(entry: &TimeEntry) -> Option<SplitSuggestion> {
    if entry.hours < MIN_SPLIT_HOURS {
        return None;
    }

    let segments: Vec<&str> = connector_re()
        .split(&entry.description)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SEGMENT_CHARS)
        .collect();

    if segments.len() < 2 {
        return None;
    }

    let per_part = (entry.hours / segments.len() as f64 * 10.0).round() / 10.0;
    let parts = segments
        .into_iter()
        .map(|s| SplitPart {
            description: s.to_string(),
            hours: per_part,
        })
        .collect();

    Some(SplitSuggestion {
        parts,
        reason: SPLIT_REASON.to_string(),
    })
}
