use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DelLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { batch, yes } = cmd {
        DelLogic::delete(cfg, *batch, *yes)?;
    }
    Ok(())
}
