use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::directory::Directory;
use crate::core::query::{QueryLogic, TimesheetFilter};
use crate::core::workflow::require_manager;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::models::timesheet::format_hours;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_status;
use crate::utils::table::Table;

use super::{actor, open_dispatcher, open_store};

/// Handle `list`: own entries, or the team's with `--team`
pub fn handle_list(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::List {
        status,
        limit,
        team,
    } = &cli.command
    else {
        return Ok(());
    };

    let user_id = actor(cli, cfg);
    let pool = open_store(cfg)?;

    let mut filter = if *team {
        require_manager(
            &pool.conn,
            &user_id,
            "You must have the 'Manager' role to list team timesheets.",
        )?;
        TimesheetFilter::new().manager(&user_id)
    } else {
        TimesheetFilter::new().employee(&user_id)
    };

    if let Some(s) = status {
        let s = Status::from_name(s).ok_or_else(|| {
            AppError::InvalidArguments(format!(
                "unknown status '{}' (expected Pending, Approved or Rejected)",
                s
            ))
        })?;
        filter = filter.status(s);
    }
    if let Some(n) = limit {
        filter = filter.limit(*n);
    }

    let sheets = QueryLogic::list_timesheets(&pool.conn, &filter)?;
    if sheets.is_empty() {
        info("No timesheets found.");
        return Ok(());
    }

    let directory = Directory::new(&pool.conn);
    let mut table = Table::new(&["ID", "DATE", "EMPLOYEE", "HOURS", "STATUS", "TASK"]);
    for ts in &sheets {
        table.add_row(vec![
            ts.short_id(),
            ts.date_str(),
            directory.resolve_name(Some(&ts.employee_id)),
            format_hours(ts.hours),
            colorize_status(ts.status),
            ts.task.clone(),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}

/// Handle `pending`: the acting manager's review queue
pub fn handle_pending(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let manager_id = actor(cli, cfg);
    let pending = open_dispatcher(cfg)
        .list_pending_approvals(&manager_id)
        .into_result()?;

    if pending.pending_sheets.is_empty() {
        info("No pending timesheets to review.");
        return Ok(());
    }

    header(format!(
        "📝 {} timesheet(s) awaiting your decision",
        pending.pending_sheets.len()
    ));
    let mut table = Table::new(&["TIMESHEET ID", "DATE", "EMPLOYEE", "HOURS", "TASK"]);
    for p in &pending.pending_sheets {
        table.add_row(vec![
            p.timesheet.id.clone(),
            p.timesheet.date_str(),
            p.employee_name.clone(),
            format_hours(p.timesheet.hours),
            p.timesheet.task.clone(),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}
