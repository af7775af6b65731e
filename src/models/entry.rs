use super::flag::{Confidence, Flag, QualityIssue, Severity, SplitSuggestion};
use crate::utils::date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Confirmed,
    Edited,
}

impl ReviewStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Confirmed => "confirmed",
            ReviewStatus::Edited => "edited",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "confirmed" => Some(ReviewStatus::Confirmed),
            "edited" => Some(ReviewStatus::Edited),
            _ => None,
        }
    }
}

/// One billable line item.
///
/// Raw fields (`date`..`amount`) come from the ingested row; everything else
/// is written by one pipeline pass or by user review actions afterwards.
/// `date` keeps the source spelling: loosely formatted dates are tolerated
/// and only the checks that need a calendar date parse it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub date: String,
    pub attorney: String,
    pub description: String,
    pub hours: f64,
    pub rate: f64,
    pub amount: f64,
    /// UTBMS code carried by the source row, if any. Raw data, kept apart
    /// from the classifier output so re-runs never lose it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utbms_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utbms_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utbms_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utbms_activity: Option<String>,

    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub quality_issues: Vec<QualityIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_suggestion: Option<SplitSuggestion>,

    #[serde(default)]
    pub rounded_hours: f64,
    #[serde(default)]
    pub adjusted_hours: f64,
    #[serde(default)]
    pub adjusted_amount: f64,

    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub write_off: bool,
    #[serde(default)]
    pub review_status: ReviewStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub review_note: String,
}

impl TimeEntry {
    /// Build an entry from one ingested row. `amount` defaults to
    /// `hours * rate` when the source row did not carry its own value.
    pub fn from_row(
        id: String,
        date: String,
        attorney: String,
        description: String,
        hours: f64,
        rate: f64,
        amount: Option<f64>,
    ) -> Self {
        let amount = amount.unwrap_or(hours * rate);
        Self {
            id,
            date,
            attorney,
            description,
            hours,
            rate,
            amount,
            source_code: String::new(),
            utbms_code: None,
            utbms_phase: None,
            utbms_task: None,
            utbms_activity: None,
            confidence: Confidence::High,
            flags: Vec::new(),
            quality_issues: Vec::new(),
            split_suggestion: None,
            rounded_hours: hours,
            adjusted_hours: hours,
            adjusted_amount: amount,
            approved: false,
            write_off: false,
            review_status: ReviewStatus::Pending,
            review_note: String::new(),
        }
    }

    /// Calendar date, when the raw date string is parseable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        date::parse_entry_date(&self.date)
    }

    /// Normalized `YYYY-MM-DD` spelling, empty when unparseable.
    /// Stored alongside the raw date for range queries.
    pub fn date_iso(&self) -> String {
        self.parsed_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn has_error_flag(&self) -> bool {
        self.flags.iter().any(|f| f.severity == Severity::Error)
    }

    /// Flag messages joined for single-line display and CSV export.
    pub fn flags_joined(&self) -> String {
        self.flags
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Quality issue messages joined for single-line display and CSV export.
    pub fn quality_joined(&self) -> String {
        self.quality_issues
            .iter()
            .map(|q| q.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Reset every pipeline-derived field before a fresh pass.
    /// User review state (approved/write-off/status/note) is kept.
    pub fn clear_annotations(&mut self) {
        self.utbms_code = None;
        self.utbms_phase = None;
        self.utbms_task = None;
        self.utbms_activity = None;
        self.confidence = Confidence::High;
        self.flags.clear();
        self.quality_issues.clear();
        self.split_suggestion = None;
        self.rounded_hours = self.hours;
        self.adjusted_hours = self.hours;
        self.adjusted_amount = self.amount;
    }
}
