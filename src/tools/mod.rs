//! The fixed operation contract exposed to external callers.
//!
//! Every operation returns a [`ToolResponse`]: failures of any kind are
//! reported as data, never propagated.

pub mod args;
pub mod schema;

use crate::core::query::{DashboardView, PendingTimesheet, QueryLogic};
use crate::core::workflow::{StatusReceipt, SubmitReceipt, SubmitRequest, WorkflowLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::utils::date::parse_optional_date;
use args::{
    DashboardArgs, HoursArg, PendingArgs, SubmitArgs, ToolName, UpdateStatusArgs, parse_args,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

/// Uniform result envelope: `{"status": "success", ...payload}` or
/// `{"status": "error", "error_kind": ..., "error_message": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResponse<T> {
    Success(T),
    Error {
        error_kind: ErrorKind,
        error_message: String,
    },
}

impl<T: Serialize> ToolResponse<T> {
    pub fn from_error(e: &AppError) -> Self {
        ToolResponse::Error {
            error_kind: e.kind(),
            error_message: e.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResponse::Success(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ToolResponse::Success(_) => None,
            ToolResponse::Error { error_kind, .. } => Some(*error_kind),
        }
    }

    pub fn into_result(self) -> AppResult<T> {
        match self {
            ToolResponse::Success(v) => Ok(v),
            ToolResponse::Error {
                error_kind,
                error_message,
            } => Err(AppError::Operation {
                kind: error_kind,
                message: error_message,
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            json!({
                "status": "error",
                "error_kind": ErrorKind::InvalidArgument,
                "error_message": format!("Failed to encode tool result: {}", e),
            })
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingApprovals {
    pub pending_sheets: Vec<PendingTimesheet>,
}

/// Routes tool invocations to the query and workflow engines.
///
/// Holds the store handle explicitly; when the store could not be opened the
/// dispatcher still exists and answers every call with `STORE_UNAVAILABLE`.
pub struct Dispatcher {
    pool: Option<DbPool>,
}

impl Dispatcher {
    pub fn new(pool: DbPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn unavailable() -> Self {
        Self { pool: None }
    }

    /// Open an existing database. Never fails: an unopenable store is
    /// reported by each operation instead.
    pub fn open(path: &str, busy_timeout_ms: u64) -> Self {
        match DbPool::open_existing(path, busy_timeout_ms) {
            Ok(pool) => Self::new(pool),
            Err(e) => {
                error!(database = path, error = %e, "could not open database");
                Self::unavailable()
            }
        }
    }

    fn run<T, F>(&mut self, tool: ToolName, op: F) -> ToolResponse<T>
    where
        T: Serialize,
        F: FnOnce(&mut DbPool) -> AppResult<T>,
    {
        let tool = tool.as_str();
        info!(tool, "executing tool");

        let pool = match self.pool.as_mut() {
            Some(pool) if matches!(pool.ping(), Ok(true)) => pool,
            _ => {
                error!(tool, "database connection not available");
                return ToolResponse::from_error(&AppError::StoreUnavailable);
            }
        };

        match op(pool) {
            Ok(v) => {
                info!(tool, "tool executed successfully");
                ToolResponse::Success(v)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::StoreUnavailable => error!(tool, error = %e, "tool failed"),
                    kind => warn!(tool, %kind, error = %e, "tool rejected request"),
                }
                ToolResponse::from_error(&e)
            }
        }
    }

    pub fn view_dashboard(&mut self, user_id: &str) -> ToolResponse<DashboardView> {
        self.run(ToolName::ViewDashboard, |pool| {
            QueryLogic::dashboard(&pool.conn, user_id)
        })
    }

    pub fn submit_timesheet(
        &mut self,
        user_id: &str,
        hours: impl Into<HoursArg>,
        date: Option<&str>,
        task: Option<&str>,
    ) -> ToolResponse<SubmitReceipt> {
        let hours = hours.into();
        self.run(ToolName::SubmitTimesheet, |pool| {
            let req = SubmitRequest {
                employee_id: user_id.to_string(),
                hours: hours.resolve()?,
                date: parse_optional_date(date)?,
                task: task.map(str::to_string),
            };
            WorkflowLogic::submit(pool, req)
        })
    }

    pub fn list_pending_approvals(&mut self, manager_id: &str) -> ToolResponse<PendingApprovals> {
        self.run(ToolName::ListPendingApprovals, |pool| {
            let pending_sheets = WorkflowLogic::list_pending_for_review(&pool.conn, manager_id)?;
            info!(manager_id, count = pending_sheets.len(), "pending timesheets found");
            Ok(PendingApprovals { pending_sheets })
        })
    }

    pub fn update_status(
        &mut self,
        manager_id: &str,
        timesheet_id: &str,
        new_status: &str,
    ) -> ToolResponse<StatusReceipt> {
        self.run(ToolName::UpdateStatus, |pool| {
            WorkflowLogic::set_status(pool, manager_id, timesheet_id, new_status)
        })
    }

    /// Invoke a tool by name with JSON arguments and return the JSON envelope.
    pub fn call(&mut self, name: &str, args: Value) -> Value {
        let Some(tool) = ToolName::parse(name) else {
            warn!(tool = name, "unknown tool requested");
            return ToolResponse::<()>::from_error(&AppError::UnknownTool(name.to_string()))
                .to_json();
        };

        match tool {
            ToolName::ViewDashboard => match parse_args::<DashboardArgs>(args) {
                Ok(a) => self.view_dashboard(&a.user_id).to_json(),
                Err(e) => invalid_args(tool, e),
            },
            ToolName::SubmitTimesheet => match parse_args::<SubmitArgs>(args) {
                Ok(a) => self
                    .submit_timesheet(&a.user_id, a.hours, a.date.as_deref(), a.task.as_deref())
                    .to_json(),
                Err(e) => invalid_args(tool, e),
            },
            ToolName::ListPendingApprovals => match parse_args::<PendingArgs>(args) {
                Ok(a) => self.list_pending_approvals(&a.manager_id).to_json(),
                Err(e) => invalid_args(tool, e),
            },
            ToolName::UpdateStatus => match parse_args::<UpdateStatusArgs>(args) {
                Ok(a) => self
                    .update_status(&a.manager_id, &a.timesheet_id, &a.new_status)
                    .to_json(),
                Err(e) => invalid_args(tool, e),
            },
        }
    }
}

fn invalid_args(tool: ToolName, e: AppError) -> Value {
    warn!(tool = tool.as_str(), error = %e, "invalid tool arguments");
    ToolResponse::<()>::from_error(&e).to_json()
}
