use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::timesheet::format_hours;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_status;
use crate::utils::table::Table;

use super::{actor, open_dispatcher};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let user_id = actor(cli, cfg);
    let view = open_dispatcher(cfg).view_dashboard(&user_id).into_result()?;

    header(format!("📊 Dashboard for {} ({})", view.user_name, view.user_id));
    println!("Manager                  : {}", view.manager_name);
    println!("Pending timesheets       : {}", view.pending_count);
    println!(
        "Approved hours (30 days) : {}",
        format_hours(view.approved_hours_last_30_days)
    );
    println!(
        "Submitted hours (30 days): {}",
        format_hours(view.submitted_hours_last_30_days)
    );
    println!();

    if view.recent_submissions.is_empty() {
        info("No submissions yet.");
        return Ok(());
    }

    println!("Recent submissions:");
    let mut table = Table::new(&["ID", "DATE", "HOURS", "STATUS", "TASK"]);
    for ts in &view.recent_submissions {
        table.add_row(vec![
            ts.short_id(),
            ts.date_str(),
            format_hours(ts.hours),
            colorize_status(ts.status),
            ts.task.clone(),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}
