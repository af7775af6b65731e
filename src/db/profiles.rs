//! Named settings profiles: a reusable `VerifierSettings` snapshot stored
//! as YAML, keyed by name.

use crate::db::models::ProfileRow;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::settings::VerifierSettings;
use chrono::Local;
use rusqlite::{OptionalExtension, params};

/// Insert or update a profile.
pub fn save_profile(pool: &mut DbPool, name: &str, settings: &VerifierSettings) -> AppResult<()> {
    let yaml = serde_yaml::to_string(settings).map_err(|e| AppError::Other(e.to_string()))?;
    let now = Local::now().to_rfc3339();

    pool.conn.execute(
        "INSERT INTO profiles (name, settings, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)
         ON CONFLICT(name) DO UPDATE SET settings = ?2, updated_at = ?3",
        params![name, yaml, now],
    )?;
    Ok(())
}

/// Load a profile by name.
pub fn load_profile(pool: &mut DbPool, name: &str) -> AppResult<VerifierSettings> {
    let yaml: Option<String> = pool
        .conn
        .query_row(
            "SELECT settings FROM profiles WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;

    let yaml = yaml.ok_or_else(|| AppError::ProfileNotFound(name.to_string()))?;
    serde_yaml::from_str(&yaml)
        .map_err(|e| AppError::Config(format!("profile '{}' is corrupted: {}", name, e)))
}

pub fn list_profiles(pool: &mut DbPool) -> AppResult<Vec<ProfileRow>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT name, settings, updated_at FROM profiles ORDER BY name ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(ProfileRow {
            name: row.get(0)?,
            settings_yaml: row.get(1)?,
            updated_at: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete a profile. Returns false when no profile had that name.
pub fn delete_profile(pool: &mut DbPool, name: &str) -> AppResult<bool> {
    let n = pool
        .conn
        .execute("DELETE FROM profiles WHERE name = ?1", [name])?;
    Ok(n > 0)
}
