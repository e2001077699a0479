//! Argument shapes of the four tools, as sent by an external caller.

use crate::errors::{AppError, AppResult};
use crate::models::timesheet::parse_hours;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ViewDashboard,
    SubmitTimesheet,
    ListPendingApprovals,
    UpdateStatus,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::ViewDashboard,
        ToolName::SubmitTimesheet,
        ToolName::ListPendingApprovals,
        ToolName::UpdateStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ViewDashboard => "view_dashboard",
            ToolName::SubmitTimesheet => "submit_timesheet",
            ToolName::ListPendingApprovals => "list_pending_approvals",
            ToolName::UpdateStatus => "update_status",
        }
    }

    /// Resolve a tool by name. The legacy `tool_*` names are accepted too.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "view_dashboard" | "tool_view_queries" => Some(ToolName::ViewDashboard),
            "submit_timesheet" | "tool_submit_timesheet" => Some(ToolName::SubmitTimesheet),
            "list_pending_approvals" | "tool_manager_approval" => {
                Some(ToolName::ListPendingApprovals)
            }
            "update_status" | "tool_update_timesheet_status" => Some(ToolName::UpdateStatus),
            _ => None,
        }
    }
}

/// `hours` as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum HoursArg {
    Number(f64),
    Text(String),
}

impl HoursArg {
    pub fn resolve(&self) -> AppResult<f64> {
        match self {
            HoursArg::Number(h) => Ok(*h),
            HoursArg::Text(s) => parse_hours(s),
        }
    }
}

impl From<f64> for HoursArg {
    fn from(h: f64) -> Self {
        HoursArg::Number(h)
    }
}

impl From<&str> for HoursArg {
    fn from(s: &str) -> Self {
        HoursArg::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardArgs {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitArgs {
    pub user_id: String,
    pub hours: HoursArg,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingArgs {
    pub manager_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusArgs {
    pub manager_id: String,
    pub timesheet_id: String,
    pub new_status: String,
}

/// Deserialize tool arguments; `null` is treated as an empty object.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> AppResult<T> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| AppError::InvalidArguments(e.to_string()))
}
