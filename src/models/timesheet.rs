use super::status::Status;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const MIN_HOURS: f64 = 0.5;
pub const MAX_HOURS: f64 = 24.0;
pub const DEFAULT_TASK: &str = "Unspecified project work.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Timesheet {
    pub id: String,                  // ⇔ timesheets.id (UUID v4)
    pub employee_id: String,         // ⇔ timesheets.employee_id
    pub manager_id: String,          // ⇔ timesheets.manager_id (fixed at submission)
    pub date: NaiveDate,             // ⇔ timesheets.date (TEXT "YYYY-MM-DD")
    pub hours: f64,                  // ⇔ timesheets.hours (REAL, 0.5..=24)
    pub task: String,                // ⇔ timesheets.task
    pub status: Status,              // ⇔ timesheets.status
    pub submitted_at: String,        // ⇔ timesheets.submitted_at (UTC RFC 3339)
    pub approved_at: Option<String>, // ⇔ timesheets.approved_at (set on decision)
}

impl Timesheet {
    /// Build a fresh `Pending` entry with a generated id and `submitted_at = now`.
    pub fn new_pending(
        employee_id: &str,
        manager_id: &str,
        date: NaiveDate,
        hours: f64,
        task: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            manager_id: manager_id.to_string(),
            date,
            hours,
            task: task.to_string(),
            status: Status::Pending,
            submitted_at: now_timestamp(),
            approved_at: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

/// UTC timestamp with fixed width so that text ordering is chronological.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// First 8 characters of an id, used in confirmation messages.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Validate the hours worked: numeric and within [0.5, 24].
pub fn validate_hours(hours: f64) -> AppResult<f64> {
    if (MIN_HOURS..=MAX_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(AppError::InvalidHours(hours))
    }
}

/// Parse a textual hours argument ("7.5") before range validation.
pub fn parse_hours(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| AppError::InvalidArguments(format!("could not convert '{}' to hours: {}", raw, e)))
}

/// Apply the default task when omitted and reject blank descriptions.
pub fn normalize_task(task: Option<&str>) -> AppResult<String> {
    let task = task.unwrap_or(DEFAULT_TASK).trim();
    if task.is_empty() {
        return Err(AppError::InvalidTask);
    }
    Ok(task.to_string())
}

/// Hours rendered like "8.0" or "7.5".
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.1}", hours)
    } else {
        format!("{}", hours)
    }
}

/// Round an aggregate to one decimal place.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_boundaries() {
        assert!(validate_hours(0.5).is_ok());
        assert!(validate_hours(24.0).is_ok());
        assert!(matches!(validate_hours(0.49), Err(AppError::InvalidHours(_))));
        assert!(matches!(validate_hours(24.01), Err(AppError::InvalidHours(_))));
        assert!(validate_hours(f64::NAN).is_err());
    }

    #[test]
    fn parse_hours_rejects_text() {
        assert_eq!(parse_hours(" 7.5 ").unwrap(), 7.5);
        assert!(matches!(parse_hours("eight"), Err(AppError::InvalidArguments(_))));
    }

    #[test]
    fn task_defaulting() {
        assert_eq!(normalize_task(None).unwrap(), DEFAULT_TASK);
        assert_eq!(normalize_task(Some("Design review")).unwrap(), "Design review");
        assert!(matches!(normalize_task(Some("")), Err(AppError::InvalidTask)));
        assert!(matches!(normalize_task(Some("   ")), Err(AppError::InvalidTask)));
    }

    #[test]
    fn new_entry_is_pending() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let ts = Timesheet::new_pending("emp", "mgr", d, 8.0, "x");
        assert_eq!(ts.status, Status::Pending);
        assert!(ts.approved_at.is_none());
        assert_eq!(ts.short_id().len(), 8);
        assert_eq!(ts.date_str(), "2025-03-10");
    }

    #[test]
    fn hours_formatting_and_rounding() {
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(round_hours(7.25 + 0.04), 7.3);
        assert_eq!(round_hours(0.0), 0.0);
    }

    #[test]
    fn short_id_handles_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
