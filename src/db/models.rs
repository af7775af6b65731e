//! Database row models. Thin wrappers around SQLite rows.

/// One processed upload.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub id: i64,
    pub source: String,
    pub format: String,
    pub profile: String,
    pub settings_yaml: String,
    pub entry_count: i64,
    pub flagged_count: i64,
    pub created_at: String,
}

/// One saved settings profile.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub name: String,
    pub settings_yaml: String,
    pub updated_at: String,
}
