//! Explicit pipeline re-run over a stored batch.
//!
//! Raw fields are reloaded from the database, the pipeline recomputes every
//! derived annotation from scratch, and user review state (approved,
//! write-off, status, note) is preserved.

use crate::config::Config;
use crate::core::{report, summary, verifier};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{profiles, queries};
use crate::errors::{AppError, AppResult};
use crate::models::settings::VerifierSettings;
use crate::ui::messages::{info, success};

pub struct RecheckLogic;

impl RecheckLogic {
    pub fn run(
        cfg: &Config,
        batch_id: i64,
        profile: Option<&str>,
        verbose: bool,
    ) -> AppResult<()> {
        let mut pool = DbPool::new(&cfg.database)?;

        let batch = queries::get_batch(&mut pool, batch_id)?;
        let entries = queries::load_entries_by_batch(&mut pool, batch_id)?;

        // Settings come from the batch snapshot unless a profile overrides
        // them for this run.
        let settings: VerifierSettings = match profile {
            Some(name) => profiles::load_profile(&mut pool, name)?,
            None => serde_yaml::from_str(&batch.settings_yaml).map_err(|e| {
                AppError::Config(format!("stored settings for batch {} unreadable: {}", batch_id, e))
            })?,
        };

        info(format!(
            "Re-running pipeline over batch {} ({} entries)",
            batch_id,
            entries.len()
        ));

        let annotated = verifier::run_pipeline(&entries, &settings);

        for e in &annotated {
            queries::update_entry_annotations(&pool.conn, batch_id, e)?;
        }

        let batch_summary = summary::build_batch_summary(&annotated);
        queries::update_batch_counts(
            &pool.conn,
            batch_id,
            batch_summary.flagged_entries as i64,
        )?;

        report::print_entries(&annotated, verbose);
        report::print_batch_summary(&batch_summary);

        if let Err(e) = ttlog(
            &pool.conn,
            "recheck",
            &format!("batch {}", batch_id),
            &format!(
                "Re-verified {} entries ({} flagged)",
                batch_summary.total_entries, batch_summary.flagged_entries
            ),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        println!();
        success(format!("Batch {} re-verified.", batch_id));
        Ok(())
    }
}
