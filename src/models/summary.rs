use serde::Serialize;

/// Per-day roll-up across all attorneys, one per distinct entry date.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub entries: usize,
    pub hours: f64,
    pub amount: f64,
    pub flag_count: usize,
    pub over_threshold: bool,
}

/// Whole-batch roll-up, recomputed fresh from current entry state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total_entries: usize,
    pub flagged_entries: usize,
    pub approved_entries: usize,
    pub written_off: usize,

    pub total_hours: f64,
    pub total_amount: f64,
    pub adjusted_hours: f64,
    pub adjusted_amount: f64,

    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,

    /// Entries that received a UTBMS phase code.
    pub coded_entries: usize,

    /// Net hours delta introduced by rounding (adjusted - raw).
    pub rounding_delta_hours: f64,
}
