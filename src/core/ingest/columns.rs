//! Header → semantic-column detection.
//!
//! Headers are normalized (lowercased, non-alphanumerics stripped) and
//! tested against an ordered regex table per canonical field. The ordering
//! is a contract: the first matching pattern wins, and for a given pattern
//! the first matching header wins.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::utils::text::normalize_header;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Date,
    Attorney,
    Description,
    Hours,
    Rate,
    Amount,
    Code,
}

const ROLE_PATTERNS: [(Role, &[&str]); 7] = [
    (
        Role::Date,
        &[
            r"^date$",
            r"^(entry|service|work|billing)date$",
            r"^dateofservice$",
            r"^day$",
        ],
    ),
    (
        Role::Attorney,
        &[
            r"^attorney$",
            r"^timekeeper$",
            r"^billedby$",
            r"^(lawyer|biller|professional)$",
            r"^(tk|tkpr|initials)$",
            r"^name$",
        ],
    ),
    (
        Role::Description,
        &[
            r"^description$",
            r"^narrative$",
            r"^(details|desc)$",
            r"^(work|task)description$",
            r"^(task|services?)$",
        ],
    ),
    (
        Role::Hours,
        &[
            r"^hours$",
            r"^(hrs|hrsworked)$",
            r"^(billed|billable)hours$",
            r"^(time|duration|units)$",
        ],
    ),
    (
        Role::Rate,
        &[r"^rate$", r"^(hourly|billing)rate$", r"^rateperhour$"],
    ),
    (
        Role::Amount,
        &[
            r"^amount$",
            r"^(total|fees|value|charge)$",
            r"^(billed|total)amount$",
        ],
    ),
    (
        Role::Code,
        &[
            r"^code$",
            r"^utbms(code)?$",
            r"^(task|phase|activity)code$",
        ],
    ),
];

fn compiled() -> &'static Vec<(Role, Vec<Regex>)> {
    static TABLE: OnceLock<Vec<(Role, Vec<Regex>)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ROLE_PATTERNS
            .iter()
            .map(|(role, pats)| {
                let regexes = pats
                    .iter()
                    .map(|p| Regex::new(p).expect("invalid column pattern"))
                    .collect();
                (*role, regexes)
            })
            .collect()
    })
}

/// Map a header row to column indices. Fields without a matching header are
/// simply absent; the ingestion call site falls back to fixed positions.
pub fn detect_roles(headers: &[String]) -> HashMap<Role, usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut roles = HashMap::new();

    for (role, patterns) in compiled() {
        'pattern: for re in patterns {
            for (idx, header) in normalized.iter().enumerate() {
                if re.is_match(header) {
                    roles.insert(*role, idx);
                    break 'pattern;
                }
            }
        }
    }

    roles
}

/// True when the row looks like a header line rather than data: at least
/// two canonical roles are recognized among its cells.
pub fn looks_like_header(row: &[String]) -> bool {
    detect_roles(row).len() >= 2
}
