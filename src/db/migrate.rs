use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `user_profiles` table.
fn create_user_profiles_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            role        TEXT NOT NULL CHECK(role IN ('Employee','Manager')),
            reports_to  TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Create the `timesheets` table.
fn create_timesheets_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timesheets (
            id            TEXT PRIMARY KEY,
            employee_id   TEXT NOT NULL,
            manager_id    TEXT NOT NULL,
            date          TEXT NOT NULL,
            hours         REAL NOT NULL CHECK(hours >= 0.5 AND hours <= 24),
            task          TEXT NOT NULL CHECK(length(trim(task)) > 0),
            status        TEXT NOT NULL DEFAULT 'Pending'
                          CHECK(status IN ('Pending','Approved','Rejected')),
            submitted_at  TEXT NOT NULL,
            approved_at   TEXT
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Indexes backing the dashboard and manager queue queries.
fn migrate_add_timesheet_indexes(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_timesheet_indexes";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_timesheets_employee_status ON timesheets(employee_id, status);
        CREATE INDEX IF NOT EXISTS idx_timesheets_manager_status ON timesheets(manager_id, status);
        CREATE INDEX IF NOT EXISTS idx_timesheets_submitted_at ON timesheets(submitted_at);
        "#,
    )?;

    mark_applied(conn, version, "Added lookup indexes to timesheets table")?;
    info!(version, "migration applied");

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "user_profiles")? {
        create_user_profiles_table(conn)?;
        info!("created user_profiles table");
    }

    if !table_exists(conn, "timesheets")? {
        create_timesheets_table(conn)?;
        info!("created timesheets table");
    }

    migrate_add_timesheet_indexes(conn)?;

    debug!("schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
        assert!(table_exists(&conn, "timesheets").unwrap());
        assert!(table_exists(&conn, "user_profiles").unwrap());
    }
}
