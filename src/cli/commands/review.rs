use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::review::{ReviewAction, ReviewLogic};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Review {
        batch,
        entry,
        approve,
        unapprove,
        write_off,
        restore,
        confirm,
        note,
    } = cmd
    {
        let action = ReviewAction {
            approve: if *approve {
                Some(true)
            } else if *unapprove {
                Some(false)
            } else {
                None
            },
            write_off: if *write_off {
                Some(true)
            } else if *restore {
                Some(false)
            } else {
                None
            },
            confirm: *confirm,
            note: note.clone(),
        };

        ReviewLogic::apply(cfg, *batch, entry, &action)?;
    }

    Ok(())
}
