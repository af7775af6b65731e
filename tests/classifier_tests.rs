//! Pattern-table tests: UTBMS ordering, quality categories, rounding
//! boundaries and split segmentation.

use rbillcheck::core::verifier::quality;
use rbillcheck::core::verifier::rounding::round_hours;
use rbillcheck::core::verifier::utbms;
use rbillcheck::models::flag::QualityKind;
use rbillcheck::models::settings::{RoundDirection, VerifierSettings};


#[test]
fn test_deposition_beats_generic_review() {
    // both "deposition" and "review" are present; the deposition pattern
    // comes first in the table and must win
    let code = utbms::classify("Review exhibits and prepare for deposition of plaintiff").unwrap();
    assert_eq!(code.code, "L330");
}

#[test]
fn test_generic_review_falls_through_to_analysis() {
    let code = utbms::classify("Review documents").unwrap();
    assert_eq!(code.code, "L120");
}

#[test]
fn test_motion_to_compel_is_discovery_motion() {
    let code = utbms::classify("Draft motion to compel discovery responses").unwrap();
    assert_eq!(code.code, "L350");
}

#[test]
fn test_summary_judgment_is_dispositive() {
    let code = utbms::classify("Revise opposition to motion for summary judgment").unwrap();
    assert_eq!(code.code, "L240");
}

#[test]
fn test_settlement_classifies_before_catch_all() {
    let code = utbms::classify("Prepare for mediation session with opposing party").unwrap();
    assert_eq!(code.code, "L160");
}

#[test]
fn test_no_match_returns_none() {
    assert!(utbms::classify("Lunch with co-counsel").is_none());
}

#[test]
fn test_code_lookup_is_case_insensitive() {
    let code = utbms::lookup("l330").unwrap();
    assert_eq!(code.task, "Depositions");
}

#[test]
fn test_activity_classification_falls_back_to_other() {
    let (code, _) = utbms::classify_activity("Telephone conference with client about strategy");
    assert_eq!(code, "A106");

    let (code, label) = utbms::classify_activity("Lunch");
    assert_eq!(code, "A111");
    assert_eq!(label, "Other");
}

// ---------------------------
// Quality checker
// ---------------------------

fn kinds(description: &str, settings: &VerifierSettings) -> Vec<QualityKind> {
    quality::check_description(description, settings)
        .into_iter()
        .map(|q| q.kind)
        .collect()
}

#[test]
fn test_vague_needs_generic_verb_and_few_tokens() {
    assert!(quality::is_vague("review documents"));
    assert!(quality::is_vague("misc case work"));
    // generic verb but 5+ tokens is acceptable
    assert!(!quality::is_vague("review documents produced by opposing counsel"));
    // specific verb stays clean regardless of length
    assert!(!quality::is_vague("draft brief"));
}

#[test]
fn test_abbreviation_reported_once_with_suggestion() {
    let settings = VerifierSettings::default();
    let issues = quality::check_description("Tel conf w/ opposing counsel", &settings);

    let abbrevs: Vec<_> = issues
        .iter()
        .filter(|q| q.kind == QualityKind::Abbreviation)
        .collect();
    assert_eq!(abbrevs.len(), 1, "first matching shorthand only");
    assert!(abbrevs[0].suggestion.is_some());
}

#[test]
fn test_client_name_leak_with_alias_and_escaping() {
    let settings = VerifierSettings {
        client_name: "Acme Corp".to_string(),
        client_aliases: vec!["Acme Holdings (US)".to_string()],
        ..VerifierSettings::default()
    };

    assert!(kinds("Call with acme corp about indemnity", &settings).contains(&QualityKind::ClientName));
    // alias with regex metacharacters must match literally
    assert!(
        kinds("Memo re Acme Holdings (US) board minutes", &settings)
            .contains(&QualityKind::ClientName)
    );
    // substring inside another word is not a leak
    assert!(!kinds("Reviewed Acmeville zoning maps", &settings).contains(&QualityKind::ClientName));
}

#[test]
fn test_client_leak_skipped_without_client_name() {
    let settings = VerifierSettings::default();
    assert!(!kinds("Call with Acme Corp", &settings).contains(&QualityKind::ClientName));
}

#[test]
fn test_privileged_phrase_detected() {
    let settings = VerifierSettings::default();
    assert!(
        kinds("Summarize attorney-client communication for file", &settings)
            .contains(&QualityKind::Privileged)
    );
}

#[test]
fn test_capitalization_flagged_independently() {
    let settings = VerifierSettings::default();
    let found = kinds("draft witness outline for trial preparation session", &settings);
    assert_eq!(found, vec![QualityKind::Capitalization]);
}

// ---------------------------
// Rounding
// ---------------------------

#[test]
fn test_rounding_boundaries() {
    assert_eq!(round_hours(1.05, 0.1, RoundDirection::Up), 1.1);
    assert_eq!(round_hours(1.05, 0.1, RoundDirection::Down), 1.0);
    // half-up at the midpoint
    assert_eq!(round_hours(1.05, 0.1, RoundDirection::Nearest), 1.1);
    // zero increment is identity, not a division error
    assert_eq!(round_hours(1.0, 0.0, RoundDirection::Up), 1.0);
    assert_eq!(round_hours(2.3, -1.0, RoundDirection::Nearest), 2.3);
}

#[test]
fn test_rounding_exact_multiples_unchanged() {
    assert_eq!(round_hours(1.1, 0.1, RoundDirection::Up), 1.1);
    assert_eq!(round_hours(1.1, 0.1, RoundDirection::Down), 1.1);
    assert_eq!(round_hours(7.5, 0.1, RoundDirection::Nearest), 7.5);
}

#[test]
fn test_rounding_quarter_hour_increment() {
    assert_eq!(round_hours(1.1, 0.25, RoundDirection::Up), 1.25);
    assert_eq!(round_hours(1.1, 0.25, RoundDirection::Down), 1.0);
    assert_eq!(round_hours(1.1, 0.25, RoundDirection::Nearest), 1.0);
}
