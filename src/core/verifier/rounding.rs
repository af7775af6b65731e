//! Hour rounding and dollar adjustment.

use crate::models::entry::TimeEntry;
use crate::models::settings::{RoundDirection, VerifierSettings};
use regex::Regex;
use std::sync::OnceLock;

// Guard against float noise at increment boundaries: 1.05 / 0.1 evaluates
// just under 10.5 and must still round up under half-up.
const EPS: f64 = 1e-6;

/// Round `hours` to a multiple of `increment` in the given direction.
/// A non-positive increment disables rounding entirely.
pub fn round_hours(hours: f64, increment: f64, direction: RoundDirection) -> f64 {
    if increment <= 0.0 {
        return hours;
    }

    let steps = hours / increment;
    let rounded_steps = match direction {
        RoundDirection::Up => (steps - EPS).ceil(),
        RoundDirection::Down => (steps + EPS).floor(),
        RoundDirection::Nearest => (steps + 0.5 + EPS).floor(),
    };

    // clean up residual float error (0.7000000000000001 → 0.7)
    (rounded_steps * increment * 10_000.0).round() / 10_000.0
}

fn travel_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\btravel(ed|ing|led|ling)?\b").expect("invalid travel pattern"))
}

pub fn is_travel(description: &str) -> bool {
    travel_re().is_match(&description.to_lowercase())
}

/// Write `adjusted_hours` / `adjusted_amount` from the rounded hours.
/// Travel entries bill at the configured multiplier when it is below 1.0.
pub fn apply_adjustments(entry: &mut TimeEntry, settings: &VerifierSettings) {
    let rate = if entry.rate > 0.0 {
        entry.rate
    } else {
        settings.hourly_rate
    };

    let effective_rate = if settings.travel_multiplier < 1.0 && is_travel(&entry.description) {
        rate * settings.travel_multiplier
    } else {
        rate
    };

    entry.adjusted_hours = entry.rounded_hours;
    entry.adjusted_amount = (entry.rounded_hours * effective_rate * 100.0).round() / 100.0;
}
