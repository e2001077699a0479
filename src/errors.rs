//! Unified application error type.
//! All modules (db, core, tools, cli) return AppError so that the tool
//! dispatcher can translate any failure into a single error envelope.

use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Failure categories surfaced to callers in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    StoreUnavailable,
    InvalidArgument,
    PermissionDenied,
    NotFound,
    ImmutableState,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::PermissionDenied => "PERMISSION_DENIED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ImmutableState => "IMMUTABLE_STATE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database connection not available")]
    StoreUnavailable,

    // ---------------------------
    // Argument validation
    // ---------------------------
    #[error("Hours must be between 0.5 and 24.")]
    InvalidHours(f64),

    #[error("Task description cannot be empty.")]
    InvalidTask,

    #[error("Invalid date '{0}'. Expected format YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid status '{0}'. Must be 'Approved' or 'Rejected'.")]
    InvalidStatus(String),

    #[error("Invalid role '{0}'. Must be 'Employee' or 'Manager'.")]
    InvalidRole(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("{0}")]
    Conflict(String),

    // ---------------------------
    // Authorization
    // ---------------------------
    #[error("{0}")]
    PermissionDenied(String),

    // ---------------------------
    // Lookups and state
    // ---------------------------
    #[error("Timesheet with ID '{0}' not found.")]
    TimesheetNotFound(String),

    #[error("User '{0}' not found.")]
    UserNotFound(String),

    #[error("Timesheet '{id}...' has already been {status} and cannot be changed.")]
    ImmutableState { id: String, status: String },

    // ---------------------------
    // Config / serialization
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Error envelope returned by a tool (CLI surface)
    // ---------------------------
    #[error("{message}")]
    Operation { kind: ErrorKind, message: String },
}

impl AppError {
    /// Map the error onto the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Io(_)
            | AppError::Db(_)
            | AppError::Migration(_)
            | AppError::StoreUnavailable
            | AppError::Config(_)
            | AppError::Yaml(_) => ErrorKind::StoreUnavailable,

            AppError::InvalidHours(_)
            | AppError::InvalidTask
            | AppError::InvalidDate(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidRole(_)
            | AppError::InvalidArguments(_)
            | AppError::UnknownTool(_)
            | AppError::Conflict(_)
            | AppError::Json(_) => ErrorKind::InvalidArgument,

            AppError::PermissionDenied(_) => ErrorKind::PermissionDenied,

            AppError::TimesheetNotFound(_) | AppError::UserNotFound(_) => ErrorKind::NotFound,

            AppError::ImmutableState { .. } => ErrorKind::ImmutableState,

            AppError::Operation { kind, .. } => *kind,
        }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        AppError::PermissionDenied(format!("ACCESS DENIED: {}", reason.into()))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_invalid_argument() {
        assert_eq!(AppError::InvalidHours(0.49).kind(), ErrorKind::InvalidArgument);
        assert_eq!(AppError::InvalidTask.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            AppError::InvalidStatus("Pending".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn store_failures_are_store_unavailable() {
        let err: AppError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        assert_eq!(AppError::StoreUnavailable.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn access_denied_prefix() {
        let err = AppError::access_denied("nope");
        assert_eq!(err.to_string(), "ACCESS DENIED: nope");
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn messages_match_caller_contract() {
        assert_eq!(
            AppError::InvalidHours(30.0).to_string(),
            "Hours must be between 0.5 and 24."
        );
        assert_eq!(
            AppError::TimesheetNotFound("abc".into()).to_string(),
            "Timesheet with ID 'abc' not found."
        );
        assert_eq!(
            AppError::InvalidStatus("Done".into()).to_string(),
            "Invalid status 'Done'. Must be 'Approved' or 'Rejected'."
        );
    }

    #[test]
    fn error_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::ImmutableState).unwrap();
        assert_eq!(json, "\"IMMUTABLE_STATE\"");
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
    }
}
