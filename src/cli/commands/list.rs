use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{report, summary};
use crate::db::models::BatchRow;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::flag::Confidence;
use crate::models::settings::VerifierSettings;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        batch,
        flagged,
        confidence,
        summary: show_summary,
        daily,
        verbose,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let Some(batch_id) = batch else {
            print_batches(&queries::load_batches(&mut pool)?);
            return Ok(());
        };

        let row = queries::get_batch(&mut pool, *batch_id)?;
        let mut entries = queries::load_entries_by_batch(&mut pool, *batch_id)?;

        if *flagged {
            entries.retain(|e| e.is_flagged());
        }
        if let Some(level) = confidence {
            let wanted = Confidence::from_db_str(&level.to_lowercase());
            entries.retain(|e| Some(e.confidence) == wanted);
        }

        if entries.is_empty() {
            println!("No entries match in batch {}.", batch_id);
            return Ok(());
        }

        let settings: VerifierSettings =
            serde_yaml::from_str(&row.settings_yaml).unwrap_or_default();

        if *show_summary {
            report::print_batch_summary(&summary::build_batch_summary(&entries));
        } else if *daily {
            let days = summary::build_daily_summaries(&entries, &settings);
            report::print_daily_summaries(&days, &settings);
        } else {
            report::print_entries(&entries, *verbose);
        }
    }

    Ok(())
}

fn print_batches(batches: &[BatchRow]) {
    if batches.is_empty() {
        println!("No batches saved yet. Run 'rbillcheck check <file>' first.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Id", 4),
        Column::new("Created", 25),
        Column::new("Source", 30),
        Column::new("Fmt", 4),
        Column::new("Profile", 12),
        Column::new("Entries", 7),
        Column::new("Flagged", 7),
    ]);

    for b in batches {
        table.add_row(vec![
            b.id.to_string(),
            b.created_at.clone(),
            b.source.clone(),
            b.format.clone(),
            b.profile.clone(),
            b.entry_count.to_string(),
            b.flagged_count.to_string(),
        ]);
    }

    println!("{}", table.render());
}
