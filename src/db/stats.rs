use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) BATCH / ENTRY COUNTS
    //
    let batches: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM batches", [], |row| row.get(0))?;
    let entries: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
    let flagged: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE flags != '[]'",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Batches:{} {}{}{}", CYAN, RESET, GREEN, batches, RESET);
    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, entries, RESET);

    if entries > 0 {
        let share = flagged as f64 * 100.0 / entries as f64;
        println!(
            "{}• Flagged:{} {} ({:.1}%)",
            CYAN, RESET, flagged, share
        );
    }

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date_iso FROM entries WHERE date_iso != '' ORDER BY date_iso ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date_iso FROM entries WHERE date_iso != '' ORDER BY date_iso DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) PROFILES
    //
    let profiles: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
    println!("{}• Profiles:{} {}", CYAN, RESET, profiles);

    println!();
    Ok(())
}
