use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `batches` table.
fn create_batches_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS batches (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            source        TEXT NOT NULL,
            format        TEXT NOT NULL DEFAULT 'auto',
            profile       TEXT NOT NULL DEFAULT '',
            settings      TEXT NOT NULL,
            entry_count   INTEGER NOT NULL DEFAULT 0,
            flagged_count INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `entries` table. Flags, quality issues and split suggestions
/// are stored as JSON blobs; `date_iso` is the normalized date used for
/// range queries (empty when the raw date is unparseable).
fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            batch_id         INTEGER NOT NULL REFERENCES batches(id) ON DELETE CASCADE,
            entry_id         TEXT NOT NULL,
            date             TEXT NOT NULL,
            date_iso         TEXT NOT NULL DEFAULT '',
            attorney         TEXT NOT NULL,
            description      TEXT NOT NULL,
            hours            REAL NOT NULL,
            rate             REAL NOT NULL,
            amount           REAL NOT NULL,
            source_code      TEXT NOT NULL DEFAULT '',
            utbms_code       TEXT,
            utbms_phase      TEXT,
            utbms_task       TEXT,
            utbms_activity   TEXT,
            confidence       TEXT NOT NULL DEFAULT 'high' CHECK(confidence IN ('high','medium','low')),
            flags            TEXT NOT NULL DEFAULT '[]',
            quality_issues   TEXT NOT NULL DEFAULT '[]',
            split_suggestion TEXT,
            rounded_hours    REAL NOT NULL DEFAULT 0,
            adjusted_hours   REAL NOT NULL DEFAULT 0,
            adjusted_amount  REAL NOT NULL DEFAULT 0,
            approved         INTEGER NOT NULL DEFAULT 0,
            write_off        INTEGER NOT NULL DEFAULT 0,
            review_status    TEXT NOT NULL DEFAULT 'pending' CHECK(review_status IN ('pending','confirmed','edited')),
            UNIQUE(batch_id, entry_id)
        );

        CREATE INDEX IF NOT EXISTS idx_entries_batch ON entries(batch_id);
        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date_iso);
        "#,
    )?;
    Ok(())
}

/// Create the `profiles` table (named, reusable verifier settings).
fn create_profiles_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            name       TEXT PRIMARY KEY,
            settings   TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// 0.3.x: free-text note attached by `review --note`.
fn migrate_add_review_note(conn: &Connection) -> Result<()> {
    let version = "20260412_0031_add_review_note";

    if table_has_column(conn, "entries", "review_note")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE entries ADD COLUMN review_note TEXT NOT NULL DEFAULT '';",
        [],
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added review_note to entries')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'review_note' to entries table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base tables
    let fresh = !table_exists(conn, "batches")?;
    create_batches_table(conn)?;
    create_entries_table(conn)?;
    create_profiles_table(conn)?;

    if fresh {
        success("Created batches/entries/profiles tables.");
    }

    // 3) Incremental column migrations
    migrate_add_review_note(conn)?;

    // 4) Indexes are idempotent; re-assert for DBs created before them
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_entries_batch ON entries(batch_id);
        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date_iso);
        "#,
    )?;

    Ok(())
}
