use crate::errors::{AppError, AppResult};
use crate::models::profile::UserProfile;
use crate::models::role::Role;
use crate::models::status::Status;
use crate::models::timesheet::Timesheet;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

// ------------------------------------------------
// user_profiles
// ------------------------------------------------

pub fn map_profile(row: &Row) -> Result<UserProfile> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(UserProfile {
        id: row.get("id")?,
        name: row.get("name")?,
        role,
        reports_to: row.get("reports_to")?,
    })
}

pub fn load_profile(conn: &Connection, id: &str) -> AppResult<Option<UserProfile>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, role, reports_to FROM user_profiles WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_profile).optional()?)
}

pub fn list_profiles(conn: &Connection) -> AppResult<Vec<UserProfile>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, role, reports_to FROM user_profiles ORDER BY role DESC, name ASC",
    )?;
    let rows = stmt.query_map([], map_profile)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_profile(conn: &Connection, p: &UserProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO user_profiles (id, name, role, reports_to) VALUES (?1, ?2, ?3, ?4)",
        params![p.id, p.name, p.role.to_db_str(), p.reports_to],
    )?;
    Ok(())
}

pub fn update_role(conn: &Connection, id: &str, role: Role) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE user_profiles SET role = ?1 WHERE id = ?2",
        params![role.to_db_str(), id],
    )?;
    Ok(n)
}

pub fn count_direct_reports(conn: &Connection, manager_id: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM user_profiles WHERE reports_to = ?1",
        [manager_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn count_profiles(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM user_profiles", [], |row| row.get(0))?;
    Ok(n)
}

// ------------------------------------------------
// timesheets
// ------------------------------------------------

pub fn map_timesheet(row: &Row) -> Result<Timesheet> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = Status::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Timesheet {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        manager_id: row.get("manager_id")?,
        date,
        hours: row.get("hours")?,
        task: row.get("task")?,
        status,
        submitted_at: row.get("submitted_at")?,
        approved_at: row.get("approved_at")?,
    })
}

const TIMESHEET_COLUMNS: &str =
    "id, employee_id, manager_id, date, hours, task, status, submitted_at, approved_at";

pub fn insert_timesheet(conn: &Connection, ts: &Timesheet) -> AppResult<()> {
    conn.execute(
        "INSERT INTO timesheets (id, employee_id, manager_id, date, hours, task, status, submitted_at, approved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ts.id,
            ts.employee_id,
            ts.manager_id,
            ts.date_str(),
            ts.hours,
            ts.task,
            ts.status.to_db_str(),
            ts.submitted_at,
            ts.approved_at,
        ],
    )?;
    Ok(())
}

pub fn load_timesheet(conn: &Connection, id: &str) -> AppResult<Option<Timesheet>> {
    let sql = format!("SELECT {} FROM timesheets WHERE id = ?1", TIMESHEET_COLUMNS);
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_timesheet).optional()?)
}

/// Move a `Pending` entry to a decided status. Returns the number of rows
/// changed: 0 means the entry is missing or was already decided.
pub fn decide_timesheet(
    conn: &Connection,
    id: &str,
    status: Status,
    approved_at: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE timesheets SET status = ?1, approved_at = ?2
         WHERE id = ?3 AND status = 'Pending'",
        params![status.to_db_str(), approved_at, id],
    )?;
    Ok(n)
}

/// Equality filters over `timesheets`; unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct TimesheetFilter {
    pub employee_id: Option<String>,
    pub manager_id: Option<String>,
    pub status: Option<Status>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TimesheetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee(mut self, id: &str) -> Self {
        self.employee_id = Some(id.to_string());
        self
    }

    pub fn manager(mut self, id: &str) -> Self {
        self.manager_id = Some(id.to_string());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the WHERE clause and its positional parameters.
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(e) = &self.employee_id {
            conditions.push("employee_id = ?");
            params.push(e.clone());
        }
        if let Some(m) = &self.manager_id {
            conditions.push("manager_id = ?");
            params.push(m.clone());
        }
        if let Some(s) = self.status {
            conditions.push("status = ?");
            params.push(s.to_db_str().to_string());
        }
        if let Some(from) = self.date_from {
            conditions.push("date >= ?");
            params.push(from.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = self.date_to {
            conditions.push("date <= ?");
            params.push(to.format("%Y-%m-%d").to_string());
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// Entries matching `filter`, most recently submitted first.
pub fn query_timesheets(conn: &Connection, filter: &TimesheetFilter) -> AppResult<Vec<Timesheet>> {
    let (clause, params) = filter.where_clause();

    let mut sql = format!("SELECT {} FROM timesheets{}", TIMESHEET_COLUMNS, clause);
    sql.push_str(" ORDER BY submitted_at DESC, rowid DESC");
    if let Some(n) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }

    let mut stmt = conn.prepare_cached(&sql)?;
    let params_refs: Vec<&dyn ToSql> = params.iter().map(|s| s as &dyn ToSql).collect();
    let rows = stmt.query_map(params_refs.as_slice(), map_timesheet)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_timesheets(conn: &Connection, filter: &TimesheetFilter) -> AppResult<i64> {
    let (clause, params) = filter.where_clause();
    let sql = format!("SELECT COUNT(*) FROM timesheets{}", clause);

    let params_refs: Vec<&dyn ToSql> = params.iter().map(|s| s as &dyn ToSql).collect();
    let n = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
    Ok(n)
}

/// Sum of `hours` over the matching entries; 0.0 when nothing matches.
pub fn sum_hours(conn: &Connection, filter: &TimesheetFilter) -> AppResult<f64> {
    let (clause, params) = filter.where_clause();
    let sql = format!("SELECT COALESCE(SUM(hours), 0.0) FROM timesheets{}", clause);

    let params_refs: Vec<&dyn ToSql> = params.iter().map(|s| s as &dyn ToSql).collect();
    let total = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
    Ok(total)
}

/// Sum of `hours` for an employee in a date range, excluding rejected entries.
pub fn sum_submitted_hours(
    conn: &Connection,
    employee_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<f64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(hours), 0.0) FROM timesheets
         WHERE employee_id = ?1 AND status != 'Rejected' AND date >= ?2 AND date <= ?3",
        params![
            employee_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        |row| row.get(0),
    )?;
    Ok(total)
}
