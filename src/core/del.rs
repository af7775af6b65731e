//! Delete a stored batch (and, via cascade, its entries).

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::io::{Write, stdin, stdout};

pub struct DelLogic;

impl DelLogic {
    pub fn delete(cfg: &Config, batch_id: i64, assume_yes: bool) -> AppResult<()> {
        let mut pool = DbPool::new(&cfg.database)?;

        let batch = queries::get_batch(&mut pool, batch_id)?;

        if !assume_yes {
            warning(format!(
                "About to delete batch {} ({}, {} entries).",
                batch.id, batch.source, batch.entry_count
            ));
            print!("Proceed? [y/N]: ");
            stdout().flush().ok();

            let mut answer = String::new();
            stdin().read_line(&mut answer)?;

            let answer = answer.trim().to_lowercase();
            if !(answer == "y" || answer == "yes") {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        let removed = queries::delete_batch(&mut pool.conn, batch_id)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "del",
            &format!("batch {}", batch_id),
            &format!("Deleted batch with {} entries", removed),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        success(format!("Deleted batch {} ({} entries).", batch_id, removed));
        Ok(())
    }
}
