use crate::db::pool::DbPool;
use crate::db::queries::{TimesheetFilter, count_profiles, count_timesheets};
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) PROFILES
    //
    let profiles = count_profiles(&pool.conn)?;
    println!("{}• Profiles:{} {}{}{}", CYAN, RESET, GREEN, profiles, RESET);

    //
    // 3) TIMESHEETS PER STATUS
    //
    let total = count_timesheets(&pool.conn, &TimesheetFilter::new())?;
    println!("{}• Timesheets:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);
    for status in [Status::Pending, Status::Approved, Status::Rejected] {
        let n = count_timesheets(&pool.conn, &TimesheetFilter::new().status(status))?;
        println!("    {:<9} {}", status.to_db_str(), n);
    }

    //
    // 4) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM timesheets", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
