use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::recheck::RecheckLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Recheck {
        batch,
        profile,
        verbose,
    } = cmd
    {
        RecheckLogic::run(cfg, *batch, profile.as_deref(), *verbose)?;
    }

    Ok(())
}
