use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::profiles;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Profile {
        save,
        list,
        show,
        delete,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(name) = save {
            profiles::save_profile(&mut pool, name, &cfg.verifier)?;

            if let Err(e) = ttlog(
                &pool.conn,
                "profile_save",
                name,
                "Saved verifier settings profile",
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Profile '{}' saved.", name));
        }

        if *list {
            let rows = profiles::list_profiles(&mut pool)?;
            if rows.is_empty() {
                println!("No profiles saved yet.");
            } else {
                let mut table = Table::new(vec![
                    Column::new("Name", 20),
                    Column::new("Updated", 25),
                ]);
                for p in &rows {
                    table.add_row(vec![p.name.clone(), p.updated_at.clone()]);
                }
                println!("{}", table.render());
            }
        }

        if let Some(name) = show {
            let settings = profiles::load_profile(&mut pool, name)?;
            println!("📄 Profile '{}':\n", name);
            println!(
                "{}",
                serde_yaml::to_string(&settings).map_err(|e| AppError::Other(e.to_string()))?
            );
        }

        if let Some(name) = delete {
            if !profiles::delete_profile(&mut pool, name)? {
                return Err(AppError::ProfileNotFound(name.clone()));
            }

            if let Err(e) = ttlog(
                &pool.conn,
                "profile_delete",
                name,
                "Deleted verifier settings profile",
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Profile '{}' deleted.", name));
        }
    }

    Ok(())
}
