//! UTBMS phase/activity classification.
//!
//! An ordered `(pattern, code)` table is applied to the lowercased
//! narrative and the first match wins. The ordering is load-bearing:
//! specific work ("deposition") must be tested before the generic verbs
//! ("review") that most narratives also contain. Reordering the table
//! changes classification results.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCode {
    pub code: &'static str,
    pub phase: &'static str,
    pub task: &'static str,
}

/// Litigation code set (ABA UTBMS): phase group name + task name per code.
const PHASE_CODES: [PhaseCode; 19] = [
    PhaseCode { code: "L110", phase: "Case Assessment, Development and Administration", task: "Fact Investigation/Development" },
    PhaseCode { code: "L120", phase: "Case Assessment, Development and Administration", task: "Analysis/Strategy" },
    PhaseCode { code: "L130", phase: "Case Assessment, Development and Administration", task: "Experts/Consultants" },
    PhaseCode { code: "L140", phase: "Case Assessment, Development and Administration", task: "Document/File Management" },
    PhaseCode { code: "L150", phase: "Case Assessment, Development and Administration", task: "Budgeting" },
    PhaseCode { code: "L160", phase: "Case Assessment, Development and Administration", task: "Settlement/Non-Binding ADR" },
    PhaseCode { code: "L210", phase: "Pre-Trial Pleadings and Motions", task: "Pleadings" },
    PhaseCode { code: "L220", phase: "Pre-Trial Pleadings and Motions", task: "Preliminary Injunctions/Provisional Remedies" },
    PhaseCode { code: "L230", phase: "Pre-Trial Pleadings and Motions", task: "Court Mandated Conferences" },
    PhaseCode { code: "L240", phase: "Pre-Trial Pleadings and Motions", task: "Dispositive Motions" },
    PhaseCode { code: "L260", phase: "Pre-Trial Pleadings and Motions", task: "Class Action Certification and Notice" },
    PhaseCode { code: "L310", phase: "Discovery", task: "Written Discovery" },
    PhaseCode { code: "L320", phase: "Discovery", task: "Document Production" },
    PhaseCode { code: "L330", phase: "Discovery", task: "Depositions" },
    PhaseCode { code: "L340", phase: "Discovery", task: "Expert Discovery" },
    PhaseCode { code: "L350", phase: "Discovery", task: "Discovery Motions" },
    PhaseCode { code: "L440", phase: "Trial Preparation and Trial", task: "Other Trial Preparation and Support" },
    PhaseCode { code: "L450", phase: "Trial Preparation and Trial", task: "Trial and Hearing Attendance" },
    PhaseCode { code: "L520", phase: "Appellate", task: "Appellate Briefs" },
];

// Ordered pattern table. Discovery-specific and motion-specific patterns
// come first; the catch-all research/review patterns must stay last.
const PHASE_PATTERNS: [(&str, &str); 19] = [
    (r"\bdepos(ition|e|ing)?\b", "L330"),
    (r"\binterrogator|requests? for (production|admission)|written discovery", "L310"),
    (r"document (production|review for production)|\bbates\b|produc(e|tion) of documents", "L320"),
    (r"expert (witness|report|disclosure|discovery)", "L340"),
    (r"motion to (compel|quash)|protective order|discovery (motion|dispute)", "L350"),
    (r"summary judgment|dispositive motion|motion to dismiss|demurrer", "L240"),
    (r"\bcomplaint\b|\banswer\b|\bpleading|counterclaim|cross-claim", "L210"),
    (r"injunction|restraining order|\btro\b", "L220"),
    (r"(status|scheduling|case management) conference|rule 16", "L230"),
    (r"class (action|certification)", "L260"),
    (r"settlement|mediat(e|ion|or)|negotiat", "L160"),
    (r"appell(ate|ant)|appeal", "L520"),
    (r"trial (prep|preparation)|prepare for trial|pretrial|witness prep", "L440"),
    (r"attend (trial|hearing)|\btrial\b|\bhearing\b|oral argument", "L450"),
    (r"(fact )?investigat|interview (witness|client)|witness statement", "L110"),
    (r"\bexpert\b|consultant", "L130"),
    (r"\bbudget", "L150"),
    (r"file (management|organization)|organiz(e|ing) (file|document)|\bindex(ing)?\b", "L140"),
    (r"legal research|\bresearch\b|analy[sz]|strateg|\breview", "L120"),
];

// Ordered activity patterns (A-codes), applied independently of the phase.
const ACTIVITY_PATTERNS: [(&str, &str, &str); 8] = [
    (r"appear|attend|\bcourt\b|\bhearing\b", "A109", "Appear For/Attend"),
    (r"\bresearch\b", "A102", "Research"),
    (r"draft|revis(e|ing)|prepar(e|ing)|edit", "A103", "Draft/Revise"),
    (r"\breview|analy[sz]|examin", "A104", "Review/Analyze"),
    (r"(call|conference|communicat|correspond|e-?mail|meet).*client", "A106", "Communicate (With Client)"),
    (r"\bcall\b|telephone|conference|communicat|correspond|e-?mail|meet", "A105", "Communicate (In Firm)"),
    (r"file|organiz|\bmanage\b", "A110", "Manage Data/Files"),
    (r"plan|strateg", "A101", "Plan and Prepare For"),
];

fn phase_table() -> &'static Vec<(Regex, &'static PhaseCode)> {
    static TABLE: OnceLock<Vec<(Regex, &'static PhaseCode)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PHASE_PATTERNS
            .iter()
            .map(|(pat, code)| {
                let re = Regex::new(pat).expect("invalid UTBMS pattern");
                let entry = lookup(code).expect("pattern references unknown code");
                (re, entry)
            })
            .collect()
    })
}

fn activity_table() -> &'static Vec<(Regex, &'static str, &'static str)> {
    static TABLE: OnceLock<Vec<(Regex, &'static str, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ACTIVITY_PATTERNS
            .iter()
            .map(|(pat, code, label)| {
                (Regex::new(pat).expect("invalid activity pattern"), *code, *label)
            })
            .collect()
    })
}

/// Look up a phase code's table entry ("L330" → Depositions).
pub fn lookup(code: &str) -> Option<&'static PhaseCode> {
    PHASE_CODES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Classify a narrative into a phase code. No match is not an error: the
/// entry simply stays uncoded.
pub fn classify(description: &str) -> Option<&'static PhaseCode> {
    let lower = description.to_lowercase();
    phase_table()
        .iter()
        .find(|(re, _)| re.is_match(&lower))
        .map(|(_, code)| *code)
}

/// Classify the activity type (A-code). Falls back to A111 Other: the
/// activity axis always has an answer once classification is requested.
pub fn classify_activity(description: &str) -> (&'static str, &'static str) {
    let lower = description.to_lowercase();
    activity_table()
        .iter()
        .find(|(re, _, _)| re.is_match(&lower))
        .map(|(_, code, label)| (*code, *label))
        .unwrap_or(("A111", "Other"))
}
