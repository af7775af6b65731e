use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::check::{CheckLogic, CheckOverrides};
use crate::errors::AppResult;

/// Verify a raw billing export.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check {
        file,
        format,
        profile,
        rate,
        client,
        date_from,
        date_to,
        no_save,
        daily,
        verbose,
    } = cmd
    {
        let overrides = CheckOverrides {
            rate: *rate,
            client: client.clone(),
            date_from: date_from.clone(),
            date_to: date_to.clone(),
        };

        CheckLogic::run(
            cfg,
            file,
            *format,
            profile.as_deref(),
            &overrides,
            *no_save,
            *daily,
            *verbose,
        )?;
    }

    Ok(())
}
