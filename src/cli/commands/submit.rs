use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::{actor, open_dispatcher};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Submit { hours, date, task } = &cli.command else {
        return Ok(());
    };

    let user_id = actor(cli, cfg);
    let receipt = open_dispatcher(cfg)
        .submit_timesheet(&user_id, hours.as_str(), date.as_deref(), task.as_deref())
        .into_result()?;

    success(&receipt.message);
    info(format!("Timesheet ID: {}", receipt.timesheet_id));
    Ok(())
}
