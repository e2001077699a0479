use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::ui::messages::success;

use super::{actor, open_dispatcher};

/// Handle `approve` and `reject`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (timesheet_id, status) = match &cli.command {
        Commands::Approve { timesheet_id } => (timesheet_id, Status::Approved),
        Commands::Reject { timesheet_id } => (timesheet_id, Status::Rejected),
        _ => return Ok(()),
    };

    let manager_id = actor(cli, cfg);
    let receipt = open_dispatcher(cfg)
        .update_status(&manager_id, timesheet_id, status.to_db_str())
        .into_result()?;

    success(receipt.message);
    Ok(())
}
