use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

use super::open_store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut pool = open_store(cfg)?;
        LogLogic::print_log(&mut pool)?;
    }

    Ok(())
}
