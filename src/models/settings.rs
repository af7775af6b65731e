use serde::{Deserialize, Serialize};

/// Rounding direction for billable hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundDirection {
    Up,
    Down,
    #[default]
    Nearest,
}

impl RoundDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundDirection::Up => "up",
            RoundDirection::Down => "down",
            RoundDirection::Nearest => "nearest",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(RoundDirection::Up),
            "down" => Some(RoundDirection::Down),
            "nearest" => Some(RoundDirection::Nearest),
            _ => None,
        }
    }
}

fn default_hourly_rate() -> f64 {
    250.0
}
fn default_long_threshold() -> f64 {
    6.0
}
fn default_day_threshold() -> f64 {
    10.0
}
fn default_rounding_increment() -> f64 {
    0.1
}
fn default_minimum_entry() -> f64 {
    0.1
}
fn default_travel_multiplier() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}

/// Process-wide verification configuration.
///
/// Passed read-only into every pipeline call; never mutated by the pipeline.
/// A named subset of these values can be saved as a reusable profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierSettings {
    /// Fallback hourly rate applied when a row carries none.
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    /// Hours above which a single entry is flagged as unusually long.
    #[serde(default = "default_long_threshold")]
    pub long_threshold: f64,

    /// Daily cap per (date, attorney); the running total re-fires the flag
    /// on every entry past the cap.
    #[serde(default = "default_day_threshold")]
    pub day_threshold: f64,

    #[serde(default = "default_rounding_increment")]
    pub rounding_increment: f64,

    #[serde(default)]
    pub rounding_direction: RoundDirection,

    /// Entries below this are flagged as sub-minimum (0 disables the check).
    #[serde(default = "default_minimum_entry")]
    pub minimum_entry: f64,

    /// Rate multiplier applied to travel entries when below 1.0.
    #[serde(default = "default_travel_multiplier")]
    pub travel_multiplier: f64,

    /// Client identity for name-leak detection. Aliases and key parties are
    /// checked in order after the primary name.
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_aliases: Vec<String>,
    #[serde(default)]
    pub key_parties: Vec<String>,

    // Per-category toggles
    #[serde(default = "default_true")]
    pub check_quality: bool,
    #[serde(default = "default_true")]
    pub check_duplicates: bool,
    #[serde(default = "default_true")]
    pub check_weekend_holiday: bool,
    #[serde(default = "default_true")]
    pub detect_codes: bool,
    #[serde(default)]
    pub detect_activities: bool,
    #[serde(default = "default_true")]
    pub suggest_splits: bool,

    /// Display metadata for reports.
    #[serde(default)]
    pub firm_name: String,

    /// Optional ingestion date window (`YYYY-MM-DD`); entries with a
    /// parseable date outside the window are dropped before the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            hourly_rate: default_hourly_rate(),
            long_threshold: default_long_threshold(),
            day_threshold: default_day_threshold(),
            rounding_increment: default_rounding_increment(),
            rounding_direction: RoundDirection::default(),
            minimum_entry: default_minimum_entry(),
            travel_multiplier: default_travel_multiplier(),
            client_name: String::new(),
            client_aliases: Vec::new(),
            key_parties: Vec::new(),
            check_quality: true,
            check_duplicates: true,
            check_weekend_holiday: true,
            detect_codes: true,
            detect_activities: false,
            suggest_splits: true,
            firm_name: String::new(),
            date_from: None,
            date_to: None,
        }
    }
}
