use crate::core::directory::Directory;
use crate::db::queries::{count_timesheets, query_timesheets, sum_hours, sum_submitted_hours};
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::models::timesheet::{Timesheet, round_hours};
use crate::utils::date;
use chrono::Duration;
use rusqlite::Connection;
use serde::Serialize;

pub use crate::db::queries::TimesheetFilter;

/// Length of the rolling dashboard window, in days.
pub const DASHBOARD_WINDOW_DAYS: i64 = 30;
/// Number of entries shown under "recent submissions".
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user_id: String,
    pub user_name: String,
    pub pending_count: usize,
    pub approved_hours_last_30_days: f64,
    pub submitted_hours_last_30_days: f64,
    pub manager_name: String,
    pub recent_submissions: Vec<Timesheet>,
}

/// A pending entry enriched with the submitter's display name.
#[derive(Debug, Clone, Serialize)]
pub struct PendingTimesheet {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub employee_name: String,
}

/// Read-only projections over the timesheet table.
pub struct QueryLogic;

impl QueryLogic {
    pub fn list_timesheets(conn: &Connection, filter: &TimesheetFilter) -> AppResult<Vec<Timesheet>> {
        query_timesheets(conn, filter)
    }

    pub fn dashboard(conn: &Connection, user_id: &str) -> AppResult<DashboardView> {
        let directory = Directory::new(conn);
        let profile = directory.resolve_profile(user_id)?;

        let pending_count = count_timesheets(
            conn,
            &TimesheetFilter::new().employee(user_id).status(Status::Pending),
        )? as usize;

        let today = date::today();
        let from = today - Duration::days(DASHBOARD_WINDOW_DAYS);

        let approved = sum_hours(
            conn,
            &TimesheetFilter::new()
                .employee(user_id)
                .status(Status::Approved)
                .between(from, today),
        )?;
        let submitted = sum_submitted_hours(conn, user_id, from, today)?;

        let manager_id = profile.as_ref().and_then(|p| p.reports_to.as_deref());
        let manager_name = directory.resolve_name(manager_id);
        let user_name = directory.resolve_name(Some(user_id));

        let recent_submissions = query_timesheets(
            conn,
            &TimesheetFilter::new().employee(user_id).limit(RECENT_LIMIT),
        )?;

        Ok(DashboardView {
            user_id: user_id.to_string(),
            user_name,
            pending_count,
            approved_hours_last_30_days: round_hours(approved),
            submitted_hours_last_30_days: round_hours(submitted),
            manager_name,
            recent_submissions,
        })
    }

    pub fn pending_for_manager(conn: &Connection, manager_id: &str) -> AppResult<Vec<PendingTimesheet>> {
        let directory = Directory::new(conn);
        let sheets = query_timesheets(
            conn,
            &TimesheetFilter::new().manager(manager_id).status(Status::Pending),
        )?;

        Ok(sheets
            .into_iter()
            .map(|timesheet| PendingTimesheet {
                employee_name: directory.resolve_name(Some(&timesheet.employee_id)),
                timesheet,
            })
            .collect())
    }
}
