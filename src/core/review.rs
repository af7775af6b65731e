//! User review actions on stored entries: approve, write off, confirm.
//! These mutate review state only; derived annotations stay until an
//! explicit `recheck`.

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::entry::ReviewStatus;
use crate::ui::messages::success;

pub struct ReviewLogic;

#[derive(Debug, Default)]
pub struct ReviewAction {
    pub approve: Option<bool>,
    pub write_off: Option<bool>,
    pub confirm: bool,
    pub note: Option<String>,
}

impl ReviewAction {
    pub fn is_empty(&self) -> bool {
        self.approve.is_none() && self.write_off.is_none() && !self.confirm && self.note.is_none()
    }
}

impl ReviewLogic {
    pub fn apply(
        cfg: &Config,
        batch_id: i64,
        entry_id: &str,
        action: &ReviewAction,
    ) -> AppResult<()> {
        if action.is_empty() {
            return Err(AppError::Other(
                "nothing to do: pass --approve, --write-off, --confirm and/or --note".to_string(),
            ));
        }

        let mut pool = DbPool::new(&cfg.database)?;

        // Ensure the batch exists before touching entries.
        queries::get_batch(&mut pool, batch_id)?;

        let status = if action.confirm {
            Some(ReviewStatus::Confirmed)
        } else if action.note.is_some() {
            // an annotation without explicit confirm marks the entry edited
            Some(ReviewStatus::Edited)
        } else {
            None
        };

        let changed = queries::set_review(
            &pool.conn,
            batch_id,
            entry_id,
            action.approve,
            action.write_off,
            status,
            action.note.as_deref(),
        )?;

        if !changed {
            return Err(AppError::EntryNotFound(entry_id.to_string(), batch_id));
        }

        let mut applied = Vec::new();
        if let Some(a) = action.approve {
            applied.push(if a { "approved" } else { "unapproved" });
        }
        if let Some(w) = action.write_off {
            applied.push(if w { "written off" } else { "restored" });
        }
        if action.confirm {
            applied.push("confirmed");
        }
        if action.note.is_some() {
            applied.push("annotated");
        }

        let message = format!("Entry {} {}", entry_id, applied.join(", "));

        if let Err(e) = ttlog(
            &pool.conn,
            "review",
            &format!("batch {} / {}", batch_id, entry_id),
            &message,
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        success(format!("{}.", message));
        Ok(())
    }
}
