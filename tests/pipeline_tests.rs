//! Library-level tests of the verification pipeline invariants.

use rbillcheck::core::verifier::run_pipeline;
use rbillcheck::models::entry::TimeEntry;
use rbillcheck::models::flag::{Confidence, FlagKind, Severity};
use rbillcheck::models::settings::VerifierSettings;


fn entry(id: &str, date: &str, attorney: &str, description: &str, hours: f64) -> TimeEntry {
    TimeEntry::from_row(
        id.to_string(),
        date.to_string(),
        attorney.to_string(),
        description.to_string(),
        hours,
        300.0,
        None,
    )
}

fn has_flag(e: &TimeEntry, kind: FlagKind) -> bool {
    e.flags.iter().any(|f| f.kind == kind)
}

#[test]
fn test_amount_defaults_to_hours_times_rate() {
    let e = entry("E0001", "2024-03-04", "J. Smith", "Draft settlement agreement", 2.0);
    assert_eq!(e.amount, 600.0);
}

#[test]
fn test_end_to_end_saturday_scenario() {
    let settings = VerifierSettings::default();
    let entries = vec![entry("E0001", "2024-01-06", "J. Smith", "review documents", 7.5)];

    let out = run_pipeline(&entries, &settings);
    let e = &out[0];

    assert!(has_flag(e, FlagKind::LongEntry), "7.5h exceeds the 6h default");
    assert!(has_flag(e, FlagKind::Weekend), "2024-01-06 is a Saturday");
    assert!(has_flag(e, FlagKind::Vague), "generic verb, 2 tokens");
    assert!(
        has_flag(e, FlagKind::BlockBilling),
        "2 words and 7.5 hours is block billing"
    );
    assert!(!has_flag(e, FlagKind::Rounding), "7.5 is already on the 0.1 grid");

    // 3 warnings (long, vague, block billing) push the entry to low
    let warnings = e
        .flags
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .count();
    assert_eq!(warnings, 3);
    assert_eq!(e.confidence, Confidence::Low);

    assert_eq!(e.rounded_hours, 7.5);
    assert_eq!(e.adjusted_amount, 2250.0);

    // quality side: vague + lowercase first letter
    assert_eq!(e.quality_issues.len(), 2);
}

#[test]
fn test_pipeline_does_not_mutate_input() {
    let settings = VerifierSettings::default();
    let entries = vec![entry("E0001", "2024-01-06", "J. Smith", "review documents", 7.5)];

    let _ = run_pipeline(&entries, &settings);

    assert!(entries[0].flags.is_empty());
    assert!(entries[0].utbms_code.is_none());
    assert_eq!(entries[0].confidence, Confidence::High);
}

#[test]
fn test_single_pass_is_idempotent() {
    let settings = VerifierSettings::default();
    let entries = vec![
        entry("E0001", "2024-01-06", "J. Smith", "review documents", 7.5),
        entry("E0002", "2024-01-08", "A. Jones", "Draft motion to compel", 3.0),
    ];

    let first = run_pipeline(&entries, &settings);
    let second = run_pipeline(&entries, &settings);
    // annotated output fed back in must not accumulate anything either
    let third = run_pipeline(&first, &settings);

    for (a, b) in first.iter().zip(second.iter()).chain(first.iter().zip(third.iter())) {
        assert_eq!(a.flags.len(), b.flags.len());
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.utbms_code, b.utbms_code);
        assert_eq!(a.quality_issues.len(), b.quality_issues.len());
        assert_eq!(a.rounded_hours, b.rounded_hours);
    }
}

#[test]
fn test_duplicate_first_occurrence_never_flagged() {
    let settings = VerifierSettings::default();
    let entries = vec![
        entry("E0001", "2024-02-01", "J. Smith", "Review discovery responses from opposing counsel", 1.0),
        entry("E0002", "2024-02-01", "J. Smith", "Review discovery responses from opposing counsel", 1.0),
        entry("E0003", "2024-02-01", "J. Smith", "Review discovery responses from opposing counsel", 1.0),
    ];

    let out = run_pipeline(&entries, &settings);

    assert!(!has_flag(&out[0], FlagKind::Duplicate));
    assert!(has_flag(&out[1], FlagKind::Duplicate));
    assert!(has_flag(&out[2], FlagKind::Duplicate));

    // duplicates cite the first entry and carry error severity
    let dup = out[1]
        .flags
        .iter()
        .find(|f| f.kind == FlagKind::Duplicate)
        .unwrap();
    assert_eq!(dup.severity, Severity::Error);
    assert!(dup.message.contains("E0001"));

    // one error flag alone forces low confidence
    assert_eq!(out[1].confidence, Confidence::Low);
}

#[test]
fn test_duplicate_detection_respects_toggle() {
    let settings = VerifierSettings {
        check_duplicates: false,
        ..VerifierSettings::default()
    };
    let entries = vec![
        entry("E0001", "2024-02-01", "J. Smith", "Review discovery responses from opposing counsel", 1.0),
        entry("E0002", "2024-02-01", "J. Smith", "Review discovery responses from opposing counsel", 1.0),
    ];

    let out = run_pipeline(&entries, &settings);
    assert!(!has_flag(&out[1], FlagKind::Duplicate));
}

#[test]
fn test_day_total_refires_once_crossed() {
    let settings = VerifierSettings::default(); // 10h cap
    let entries = vec![
        entry("E0001", "2024-02-01", "J. Smith", "Prepare outline for expert deposition", 4.0),
        entry("E0002", "2024-02-01", "J. Smith", "Draft deposition questions for expert witness", 4.0),
        entry("E0003", "2024-02-01", "J. Smith", "Summarize deposition transcript excerpts", 3.0),
        entry("E0004", "2024-02-01", "J. Smith", "Update case chronology with deposition dates", 1.0),
        entry("E0005", "2024-02-02", "J. Smith", "Review expert report for completeness today", 1.0),
    ];

    let out = run_pipeline(&entries, &settings);

    assert!(!has_flag(&out[0], FlagKind::DayTotal)); // 4.0
    assert!(!has_flag(&out[1], FlagKind::DayTotal)); // 8.0
    assert!(has_flag(&out[2], FlagKind::DayTotal)); // 11.0, crossed
    assert!(has_flag(&out[3], FlagKind::DayTotal)); // 12.0, still over
    assert!(!has_flag(&out[4], FlagKind::DayTotal)); // new day
}

#[test]
fn test_day_total_keyed_per_attorney() {
    let settings = VerifierSettings::default();
    let entries = vec![
        entry("E0001", "2024-02-01", "J. Smith", "Prepare summary judgment motion draft", 6.0),
        entry("E0002", "2024-02-01", "A. Jones", "Research standard of review for appeal", 6.0),
    ];

    let out = run_pipeline(&entries, &settings);
    assert!(!has_flag(&out[0], FlagKind::DayTotal));
    assert!(!has_flag(&out[1], FlagKind::DayTotal));
}

#[test]
fn test_minimum_entry_flag_and_disable() {
    let mut settings = VerifierSettings::default(); // minimum 0.1
    settings.minimum_entry = 0.25;

    let entries = vec![entry("E0001", "2024-02-01", "J. Smith", "File notice of appearance", 0.1)];
    let out = run_pipeline(&entries, &settings);
    assert!(has_flag(&out[0], FlagKind::MinimumEntry));

    settings.minimum_entry = 0.0;
    let out = run_pipeline(&entries, &settings);
    assert!(!has_flag(&out[0], FlagKind::MinimumEntry));
}

#[test]
fn test_weekend_check_skips_unparseable_dates() {
    let settings = VerifierSettings::default();
    let entries = vec![entry("E0001", "sometime last week", "J. Smith", "Draft answer to amended complaint", 1.0)];

    // must not panic, and no weekend flag can be derived
    let out = run_pipeline(&entries, &settings);
    assert!(!has_flag(&out[0], FlagKind::Weekend));
}

#[test]
fn test_confidence_tiers() {
    let settings = VerifierSettings {
        check_weekend_holiday: false,
        ..VerifierSettings::default()
    };

    // zero flags, zero issues → high
    let clean = vec![entry("E0001", "2024-02-01", "J. Smith", "Draft reply brief on damages issues", 2.0)];
    assert_eq!(run_pipeline(&clean, &settings)[0].confidence, Confidence::High);

    // one warning (long entry) → medium
    let one_warning = vec![entry("E0001", "2024-02-01", "J. Smith", "Draft reply brief addressing all damages arguments", 6.5)];
    assert_eq!(
        run_pipeline(&one_warning, &settings)[0].confidence,
        Confidence::Medium
    );

    // no flags but 2 quality issues (abbreviation + lowercase) → medium
    let two_issues = vec![entry("E0001", "2024-02-01", "J. Smith", "draft letter to opposing counsel w/ enclosures", 1.0)];
    let out = run_pipeline(&two_issues, &settings);
    assert!(out[0].flags.is_empty());
    assert_eq!(out[0].quality_issues.len(), 2);
    assert_eq!(out[0].confidence, Confidence::Medium);
}

#[test]
fn test_travel_entries_bill_at_multiplier() {
    let settings = VerifierSettings {
        travel_multiplier: 0.5,
        check_weekend_holiday: false,
        ..VerifierSettings::default()
    };
    let entries = vec![entry("E0001", "2024-02-01", "J. Smith", "Travel to courthouse for motion hearing", 2.0)];

    let out = run_pipeline(&entries, &settings);
    assert!(has_flag(&out[0], FlagKind::Travel));
    // 2.0h * 300 * 0.5
    assert_eq!(out[0].adjusted_amount, 300.0);
}

#[test]
fn test_split_suggested_for_multi_task_entry() {
    let settings = VerifierSettings::default();
    let entries = vec![entry(
        "E0001",
        "2024-02-01",
        "J. Smith",
        "Draft motion for protective order and prepare exhibit index for hearing",
        2.0,
    )];

    let out = run_pipeline(&entries, &settings);
    let split = out[0].split_suggestion.as_ref().expect("split expected");
    assert_eq!(split.parts.len(), 2);
    assert_eq!(split.parts[0].hours, 1.0);
    assert_eq!(split.parts[1].hours, 1.0);
}

#[test]
fn test_split_not_suggested_below_one_hour() {
    let settings = VerifierSettings::default();
    let entries = vec![entry(
        "E0001",
        "2024-02-01",
        "J. Smith",
        "Draft motion for protective order and prepare exhibit index for hearing",
        0.5,
    )];

    let out = run_pipeline(&entries, &settings);
    assert!(out[0].split_suggestion.is_none());
}
