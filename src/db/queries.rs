use crate::db::models::BatchRow;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{ReviewStatus, TimeEntry};
use crate::models::flag::Confidence;
use crate::models::settings::VerifierSettings;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Result, Row, params};

fn bad_column<E: std::error::Error + Send + Sync + 'static>(e: E) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub fn map_entry_row(row: &Row) -> Result<TimeEntry> {
    let confidence_str: String = row.get("confidence")?;
    let confidence = Confidence::from_db_str(&confidence_str).ok_or_else(|| {
        bad_column(AppError::Other(format!(
            "Invalid confidence: {}",
            confidence_str
        )))
    })?;

    let status_str: String = row.get("review_status")?;
    let review_status = ReviewStatus::from_db_str(&status_str).ok_or_else(|| {
        bad_column(AppError::Other(format!(
            "Invalid review status: {}",
            status_str
        )))
    })?;

    let flags_json: String = row.get("flags")?;
    let quality_json: String = row.get("quality_issues")?;
    let split_json: Option<String> = row.get("split_suggestion")?;

    Ok(TimeEntry {
        id: row.get("entry_id")?,
        date: row.get("date")?,
        attorney: row.get("attorney")?,
        description: row.get("description")?,
        hours: row.get("hours")?,
        rate: row.get("rate")?,
        amount: row.get("amount")?,
        source_code: row.get("source_code")?,
        utbms_code: row.get("utbms_code")?,
        utbms_phase: row.get("utbms_phase")?,
        utbms_task: row.get("utbms_task")?,
        utbms_activity: row.get("utbms_activity")?,
        confidence,
        flags: serde_json::from_str(&flags_json).map_err(bad_column)?,
        quality_issues: serde_json::from_str(&quality_json).map_err(bad_column)?,
        split_suggestion: match split_json {
            Some(s) if !s.is_empty() => Some(serde_json::from_str(&s).map_err(bad_column)?),
            _ => None,
        },
        rounded_hours: row.get("rounded_hours")?,
        adjusted_hours: row.get("adjusted_hours")?,
        adjusted_amount: row.get("adjusted_amount")?,
        approved: row.get::<_, i64>("approved")? == 1,
        write_off: row.get::<_, i64>("write_off")? == 1,
        review_status,
        review_note: row.get("review_note")?,
    })
}

fn map_batch_row(row: &Row) -> Result<BatchRow> {
    Ok(BatchRow {
        id: row.get("id")?,
        source: row.get("source")?,
        format: row.get("format")?,
        profile: row.get("profile")?,
        settings_yaml: row.get("settings")?,
        entry_count: row.get("entry_count")?,
        flagged_count: row.get("flagged_count")?,
        created_at: row.get("created_at")?,
    })
}

/// Persist a processed batch with its entries and a settings snapshot.
/// Returns the new batch id.
pub fn insert_batch(
    conn: &mut Connection,
    source: &str,
    format: &str,
    profile: &str,
    settings: &VerifierSettings,
    entries: &[TimeEntry],
) -> AppResult<i64> {
    let settings_yaml =
        serde_yaml::to_string(settings).map_err(|e| AppError::Other(e.to_string()))?;
    let flagged = entries.iter().filter(|e| e.is_flagged()).count() as i64;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO batches (source, format, profile, settings, entry_count, flagged_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            source,
            format,
            profile,
            settings_yaml,
            entries.len() as i64,
            flagged,
            Local::now().to_rfc3339(),
        ],
    )?;
    let batch_id = tx.last_insert_rowid();

    for e in entries {
        insert_entry(&tx, batch_id, e)?;
    }

    tx.commit()?;
    Ok(batch_id)
}

fn insert_entry(conn: &Connection, batch_id: i64, e: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO entries (
            batch_id, entry_id, date, date_iso, attorney, description,
            hours, rate, amount, source_code,
            utbms_code, utbms_phase, utbms_task, utbms_activity,
            confidence, flags, quality_issues, split_suggestion,
            rounded_hours, adjusted_hours, adjusted_amount,
            approved, write_off, review_status, review_note
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                  ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
        params![
            batch_id,
            e.id,
            e.date,
            e.date_iso(),
            e.attorney,
            e.description,
            e.hours,
            e.rate,
            e.amount,
            e.source_code,
            e.utbms_code,
            e.utbms_phase,
            e.utbms_task,
            e.utbms_activity,
            e.confidence.to_db_str(),
            serde_json::to_string(&e.flags).map_err(|err| AppError::Other(err.to_string()))?,
            serde_json::to_string(&e.quality_issues)
                .map_err(|err| AppError::Other(err.to_string()))?,
            e.split_suggestion
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|err| AppError::Other(err.to_string()))?,
            e.rounded_hours,
            e.adjusted_hours,
            e.adjusted_amount,
            if e.approved { 1 } else { 0 },
            if e.write_off { 1 } else { 0 },
            e.review_status.to_db_str(),
            e.review_note,
        ],
    )?;
    Ok(())
}

/// Rewrite the derived annotations of one entry after a re-run.
/// Raw fields and user review state stay untouched.
pub fn update_entry_annotations(conn: &Connection, batch_id: i64, e: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE entries
         SET utbms_code = ?1, utbms_phase = ?2, utbms_task = ?3, utbms_activity = ?4,
             confidence = ?5, flags = ?6, quality_issues = ?7, split_suggestion = ?8,
             rounded_hours = ?9, adjusted_hours = ?10, adjusted_amount = ?11
         WHERE batch_id = ?12 AND entry_id = ?13",
        params![
            e.utbms_code,
            e.utbms_phase,
            e.utbms_task,
            e.utbms_activity,
            e.confidence.to_db_str(),
            serde_json::to_string(&e.flags).map_err(|err| AppError::Other(err.to_string()))?,
            serde_json::to_string(&e.quality_issues)
                .map_err(|err| AppError::Other(err.to_string()))?,
            e.split_suggestion
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|err| AppError::Other(err.to_string()))?,
            e.rounded_hours,
            e.adjusted_hours,
            e.adjusted_amount,
            batch_id,
            e.id,
        ],
    )?;
    Ok(())
}

/// Update user review state of one entry. Returns false when no entry
/// matched.
pub fn set_review(
    conn: &Connection,
    batch_id: i64,
    entry_id: &str,
    approved: Option<bool>,
    write_off: Option<bool>,
    status: Option<ReviewStatus>,
    note: Option<&str>,
) -> AppResult<bool> {
    let mut changed = 0;

    if let Some(a) = approved {
        changed += conn.execute(
            "UPDATE entries SET approved = ?1 WHERE batch_id = ?2 AND entry_id = ?3",
            params![if a { 1 } else { 0 }, batch_id, entry_id],
        )?;
    }
    if let Some(w) = write_off {
        changed += conn.execute(
            "UPDATE entries SET write_off = ?1 WHERE batch_id = ?2 AND entry_id = ?3",
            params![if w { 1 } else { 0 }, batch_id, entry_id],
        )?;
    }
    if let Some(s) = status {
        changed += conn.execute(
            "UPDATE entries SET review_status = ?1 WHERE batch_id = ?2 AND entry_id = ?3",
            params![s.to_db_str(), batch_id, entry_id],
        )?;
    }
    if let Some(n) = note {
        changed += conn.execute(
            "UPDATE entries SET review_note = ?1 WHERE batch_id = ?2 AND entry_id = ?3",
            params![n, batch_id, entry_id],
        )?;
    }

    Ok(changed > 0)
}

/// Refresh the denormalized flagged-entry count after a re-run.
pub fn update_batch_counts(conn: &Connection, batch_id: i64, flagged: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE batches SET flagged_count = ?1 WHERE id = ?2",
        params![flagged, batch_id],
    )?;
    Ok(())
}

pub fn load_entries_by_batch(pool: &mut DbPool, batch_id: i64) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM entries
         WHERE batch_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([batch_id], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries across all batches inside a normalized date window.
/// Unparseable raw dates (empty `date_iso`) never match a range query.
pub fn load_entries_by_range(
    pool: &mut DbPool,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM entries
         WHERE date_iso != '' AND date_iso BETWEEN ?1 AND ?2
         ORDER BY date_iso ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        map_entry_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_batches(pool: &mut DbPool) -> AppResult<Vec<BatchRow>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM batches ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_batch_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_batch(pool: &mut DbPool, batch_id: i64) -> AppResult<BatchRow> {
    let mut stmt = pool.conn.prepare("SELECT * FROM batches WHERE id = ?1")?;

    let mut rows = stmt.query_map([batch_id], map_batch_row)?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(AppError::BatchNotFound(batch_id)),
    }
}

/// Delete a batch and (via cascade) its entries. Returns the number of
/// removed entries.
pub fn delete_batch(conn: &mut Connection, batch_id: i64) -> AppResult<usize> {
    let tx = conn.transaction()?;
    let entries = tx.execute("DELETE FROM entries WHERE batch_id = ?1", [batch_id])?;
    let batches = tx.execute("DELETE FROM batches WHERE id = ?1", [batch_id])?;
    tx.commit()?;

    if batches == 0 {
        return Err(AppError::BatchNotFound(batch_id));
    }
    Ok(entries)
}

pub fn load_log(pool: &mut DbPool) -> Result<Vec<(String, String)>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT date, message FROM log ORDER BY date DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
