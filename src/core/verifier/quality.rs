//! Narrative quality and compliance checks.
//!
//! Each category reports at most one issue (first matching pattern), and
//! the categories are independent: one description can carry several
//! issues at once.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

use crate::models::flag::{QualityIssue, QualityKind};
use crate::models::settings::VerifierSettings;
use crate::utils::text::word_count;

// Generic leading verbs that say nothing about the work performed.
const VAGUE_PATTERN: &str = r"^(review(ed|ing)?|various|misc(ellaneous)?|work(ed)? on|attention to|attend to|follow(ed)? up|e-?mails?|calls?|research)\b";

// Legal shorthand with its long form, word-boundary matched.
const ABBREVIATIONS: [(&str, &str); 10] = [
    (r"\bre:", "regarding"),
    (r"\bw/o\b", "without"),
    (r"\bw/", "with"),
    (r"\bb/c\b", "because"),
    (r"\battn\b", "attention"),
    (r"\btel\b", "telephone call"),
    (r"\bconf\b", "conference"),
    (r"\bcorr\b", "correspondence"),
    (r"\bmtg\b", "meeting"),
    (r"\bltr\b", "letter"),
];

const PRIVILEGED_PHRASES: [&str; 5] = [
    "attorney-client",
    "attorney client",
    "privileged",
    "work product",
    "confidential communication",
];

fn vague_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VAGUE_PATTERN).expect("invalid vagueness pattern"))
}

/// Shared predicate: also raised as a top-level pipeline flag, in addition
/// to the quality issue reported here.
pub fn is_vague(description: &str) -> bool {
    let lower = description.trim().to_lowercase();
    vague_re().is_match(&lower) && word_count(&lower) < 5
}

fn check_vagueness(description: &str) -> Option<QualityIssue> {
    if !is_vague(description) {
        return None;
    }
    Some(QualityIssue {
        kind: QualityKind::Vague,
        message: "Description is too generic".to_string(),
        suggestion: Some(
            "State the specific task, subject matter and purpose (e.g. 'Review draft asset purchase agreement for indemnification terms')".to_string(),
        ),
    })
}

fn abbreviation_table() -> &'static Vec<(Regex, &'static str)> {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ABBREVIATIONS
            .iter()
            .map(|(pat, long)| (Regex::new(pat).expect("invalid abbreviation pattern"), *long))
            .collect()
    })
}

fn check_abbreviations(description: &str) -> Option<QualityIssue> {
    let lower = description.to_lowercase();
    for (re, long_form) in abbreviation_table() {
        if let Some(m) = re.find(&lower) {
            return Some(QualityIssue {
                kind: QualityKind::Abbreviation,
                message: format!("Contains shorthand '{}'", m.as_str()),
                suggestion: Some(format!("Write out '{}'", long_form)),
            });
        }
    }
    None
}

/// Word-boundary, case-insensitive match of the client name, then each
/// alias and key party in order. Names are regex-escaped: "Smith & Co."
/// must not become a pattern operator.
fn check_client_leak(description: &str, settings: &VerifierSettings) -> Option<QualityIssue> {
    if settings.client_name.is_empty() {
        return None;
    }

    let candidates = std::iter::once(&settings.client_name)
        .chain(settings.client_aliases.iter())
        .chain(settings.key_parties.iter());

    for name in candidates {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        // \b only works against word characters; a name ending in ")" or
        // "." must not demand a boundary there
        let lead = if name.starts_with(|c: char| c.is_alphanumeric()) {
            r"\b"
        } else {
            ""
        };
        let trail = if name.ends_with(|c: char| c.is_alphanumeric()) {
            r"\b"
        } else {
            ""
        };
        let pattern = format!("{}{}{}", lead, regex::escape(name), trail);
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .ok()?;
        if re.is_match(description) {
            return Some(QualityIssue {
                kind: QualityKind::ClientName,
                message: format!("Mentions '{}' by name", name),
                suggestion: Some(
                    "Refer to parties generically ('the client', 'opposing party') in billing narratives".to_string(),
                ),
            });
        }
    }
    None
}

fn check_privileged(description: &str) -> Option<QualityIssue> {
    let lower = description.to_lowercase();
    PRIVILEGED_PHRASES
        .iter()
        .find(|p| lower.contains(*p))
        .map(|p| QualityIssue {
            kind: QualityKind::Privileged,
            message: format!("References privileged material ('{}')", p),
            suggestion: Some(
                "Keep privilege designations out of invoice narratives".to_string(),
            ),
        })
}

fn check_capitalization(description: &str) -> Option<QualityIssue> {
    let first = description.trim().chars().next()?;
    if first.is_lowercase() {
        return Some(QualityIssue {
            kind: QualityKind::Capitalization,
            message: "Description starts with a lowercase letter".to_string(),
            suggestion: None,
        });
    }
    None
}

/// Run every quality category against one narrative.
pub fn check_description(description: &str, settings: &VerifierSettings) -> Vec<QualityIssue> {
    [
        check_vagueness(description),
        check_abbreviations(description),
        check_client_leak(description, settings),
        check_privileged(description),
        check_capitalization(description),
    ]
    .into_iter()
    .flatten()
    .collect()
}
