use serde::{Deserialize, Serialize};

/// Severity of a pipeline flag. Only `Error` level flags (duplicates)
/// force an entry into low confidence on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    LongEntry,
    DayTotal,
    MinimumEntry,
    Rounding,
    BlockBilling,
    Duplicate,
    Weekend,
    Holiday,
    Vague,
    Travel,
}

impl FlagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::LongEntry => "long_entry",
            FlagKind::DayTotal => "day_total",
            FlagKind::MinimumEntry => "minimum_entry",
            FlagKind::Rounding => "rounding",
            FlagKind::BlockBilling => "block_billing",
            FlagKind::Duplicate => "duplicate",
            FlagKind::Weekend => "weekend",
            FlagKind::Holiday => "holiday",
            FlagKind::Vague => "vague",
            FlagKind::Travel => "travel",
        }
    }
}

/// One anomaly raised by the pipeline. Flags are recomputed fresh on every
/// pipeline pass, never accumulated across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub severity: Severity,
    pub message: String,
}

impl Flag {
    pub fn new(kind: FlagKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityKind {
    Vague,
    Abbreviation,
    ClientName,
    Privileged,
    Capitalization,
}

impl QualityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityKind::Vague => "vague",
            QualityKind::Abbreviation => "abbreviation",
            QualityKind::ClientName => "client_name",
            QualityKind::Privileged => "privileged",
            QualityKind::Capitalization => "capitalization",
        }
    }
}

/// Narrative quality defect. At most one issue is reported per category,
/// categories are checked independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: QualityKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPart {
    pub description: String,
    pub hours: f64,
}

/// Proposed decomposition of a multi-task narrative into discrete entries.
/// Part hours are divided evenly and sum back to (about) the original hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSuggestion {
    pub parts: Vec<SplitPart>,
    pub reason: String,
}

/// Review-effort tier derived from flags and quality issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }
}
