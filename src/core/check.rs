//! High-level business logic for the `check` command: read a raw export,
//! ingest it, run the verification pipeline, persist the batch and print
//! the report.

use std::fs;

use crate::config::Config;
use crate::core::ingest::{self, InputFormat};
use crate::core::{report, summary, verifier};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{profiles, queries};
use crate::errors::{AppError, AppResult};
use crate::models::settings::VerifierSettings;
use crate::ui::messages::{info, success};

/// CLI-level overrides applied on top of config/profile settings.
#[derive(Debug, Default)]
pub struct CheckOverrides {
    pub rate: Option<f64>,
    pub client: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

pub struct CheckLogic;

impl CheckLogic {
    /// Resolve effective settings: config defaults → named profile → CLI
    /// overrides.
    pub fn resolve_settings(
        pool: &mut DbPool,
        cfg: &Config,
        profile: Option<&str>,
        overrides: &CheckOverrides,
    ) -> AppResult<VerifierSettings> {
        let mut settings = match profile {
            Some(name) => profiles::load_profile(pool, name)?,
            None => cfg.verifier.clone(),
        };

        if let Some(rate) = overrides.rate {
            settings.hourly_rate = rate;
        }
        if let Some(client) = &overrides.client {
            settings.client_name = client.clone();
        }
        if overrides.date_from.is_some() {
            settings.date_from = overrides.date_from.clone();
        }
        if overrides.date_to.is_some() {
            settings.date_to = overrides.date_to.clone();
        }

        Ok(settings)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run(
        cfg: &Config,
        file: &str,
        format: InputFormat,
        profile: Option<&str>,
        overrides: &CheckOverrides,
        no_save: bool,
        daily: bool,
        verbose: bool,
    ) -> AppResult<()> {
        let raw = fs::read_to_string(file)
            .map_err(|e| AppError::Ingest(format!("cannot read '{}': {}", file, e)))?;

        let mut pool = DbPool::new(&cfg.database)?;
        let settings = Self::resolve_settings(&mut pool, cfg, profile, overrides)?;

        //
        // 1. Ingest (the only step allowed to fail)
        //
        let entries = ingest::parse_input(&raw, format, &settings)?;
        info(format!(
            "Loaded {} entr{} from {}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            file
        ));

        //
        // 2. Verify
        //
        let annotated = verifier::run_pipeline(&entries, &settings);

        //
        // 3. Report
        //
        report::print_entries(&annotated, verbose);

        let batch_summary = summary::build_batch_summary(&annotated);
        report::print_batch_summary(&batch_summary);

        if daily {
            let days = summary::build_daily_summaries(&annotated, &settings);
            report::print_daily_summaries(&days, &settings);
        }

        //
        // 4. Persist
        //
        if no_save {
            info("Batch not saved (--no-save).");
            return Ok(());
        }

        let batch_id = queries::insert_batch(
            &mut pool.conn,
            file,
            format.as_str(),
            profile.unwrap_or(""),
            &settings,
            &annotated,
        )?;

        if let Err(e) = ttlog(
            &pool.conn,
            "check",
            &format!("batch {}", batch_id),
            &format!(
                "Verified {} entries from {} ({} flagged)",
                batch_summary.total_entries, file, batch_summary.flagged_entries
            ),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        println!();
        success(format!("Saved as batch {}.", batch_id));
        Ok(())
    }
}
