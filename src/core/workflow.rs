//! Timesheet state machine: submission and manager decisions.
//!
//! Every entry starts `Pending` and is decided exactly once, by the manager
//! recorded on it at submission time. `Approved` and `Rejected` are terminal.

use crate::core::directory::Directory;
use crate::core::query::{PendingTimesheet, QueryLogic};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{decide_timesheet, insert_timesheet, load_profile, load_timesheet};
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::models::timesheet::{
    Timesheet, format_hours, normalize_task, now_timestamp, short_id, validate_hours,
};
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub employee_id: String,
    pub hours: f64,
    pub date: Option<NaiveDate>,
    pub task: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub message: String,
    pub timesheet_id: String,
    pub timesheet: Timesheet,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReceipt {
    pub message: String,
    pub timesheet_id: String,
    pub new_status: Status,
}

pub struct WorkflowLogic;

impl WorkflowLogic {
    pub fn submit(pool: &mut DbPool, req: SubmitRequest) -> AppResult<SubmitReceipt> {
        let hours = validate_hours(req.hours)?;
        let task = normalize_task(req.task.as_deref())?;
        let work_date = req.date.unwrap_or_else(date::today);

        let profile = load_profile(&pool.conn, &req.employee_id)?
            .ok_or_else(|| AppError::UserNotFound(req.employee_id.clone()))?;

        // The approver is captured now; later reassignments do not move the entry.
        let manager_id = profile.reports_to.clone().ok_or_else(|| {
            AppError::access_denied(format!(
                "'{}' has no assigned manager to approve timesheets.",
                profile.id
            ))
        })?;

        let sheet = Timesheet::new_pending(&profile.id, &manager_id, work_date, hours, &task);
        insert_timesheet(&pool.conn, &sheet)?;

        let message = format!(
            "Timesheet submitted for {} ({} hours). Task: '{}'. Awaiting manager approval.",
            sheet.date_str(),
            format_hours(hours),
            task
        );

        if let Err(e) = ttlog(&pool.conn, "submit", &sheet.id, &message) {
            warn!(error = %e, "failed to write audit log");
        }
        info!(timesheet_id = %sheet.id, employee_id = %sheet.employee_id, manager_id = %sheet.manager_id, "timesheet submitted");

        Ok(SubmitReceipt {
            message,
            timesheet_id: sheet.id.clone(),
            timesheet: sheet,
        })
    }

    pub fn list_pending_for_review(conn: &Connection, actor_id: &str) -> AppResult<Vec<PendingTimesheet>> {
        require_manager(
            conn,
            actor_id,
            "You must have the 'Manager' role to perform approvals.",
        )?;
        QueryLogic::pending_for_manager(conn, actor_id)
    }

    /// Approve or reject an entry on behalf of `actor_id`.
    ///
    /// Role, existence, ownership and terminality checks run in the same
    /// IMMEDIATE transaction as the write, so no other writer can decide the
    /// entry in between.
    pub fn set_status(
        pool: &mut DbPool,
        actor_id: &str,
        timesheet_id: &str,
        new_status: &str,
    ) -> AppResult<StatusReceipt> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        require_manager(
            &tx,
            actor_id,
            "You must have the 'Manager' role to perform this action.",
        )?;

        let status = Status::decision_from_name(new_status)
            .ok_or_else(|| AppError::InvalidStatus(new_status.to_string()))?;

        let sheet = load_timesheet(&tx, timesheet_id)?
            .ok_or_else(|| AppError::TimesheetNotFound(timesheet_id.to_string()))?;

        if sheet.manager_id != actor_id {
            warn!(
                actor_id,
                timesheet_id,
                owner = %sheet.manager_id,
                "manager attempted to decide another manager's timesheet"
            );
            return Err(AppError::access_denied(format!(
                "You are not the manager for timesheet '{}'.",
                timesheet_id
            )));
        }

        if !sheet.status.can_transition_to(status) {
            return Err(AppError::ImmutableState {
                id: sheet.short_id(),
                status: sheet.status.to_string(),
            });
        }

        let changed = decide_timesheet(&tx, timesheet_id, status, &now_timestamp())?;
        if changed == 0 {
            return Err(AppError::Conflict(format!(
                "Failed to update timesheet '{}'. It may have been changed concurrently.",
                timesheet_id
            )));
        }

        let message = format!("Timesheet '{}...' has been {}.", short_id(timesheet_id), status);
        ttlog(&tx, status_operation(status), timesheet_id, &message)?;
        tx.commit()?;

        info!(actor_id, timesheet_id, status = %status, "timesheet decided");

        Ok(StatusReceipt {
            message,
            timesheet_id: timesheet_id.to_string(),
            new_status: status,
        })
    }
}

fn status_operation(status: Status) -> &'static str {
    match status {
        Status::Approved => "approve",
        Status::Rejected => "reject",
        Status::Pending => "pending",
    }
}

/// Deny unless `actor_id` names a profile with the Manager role.
pub fn require_manager(conn: &Connection, actor_id: &str, reason: &str) -> AppResult<()> {
    let is_manager = Directory::new(conn)
        .resolve_profile(actor_id)?
        .is_some_and(|p| p.is_manager());

    if !is_manager {
        warn!(actor_id, "access denied: actor is not a manager");
        return Err(AppError::access_denied(reason));
    }
    Ok(())
}
