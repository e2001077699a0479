use crate::db::migrate::run_pending_migrations;
use crate::db::queries::{count_profiles, insert_profile};
use crate::errors::AppResult;
use crate::models::profile::UserProfile;
use crate::models::role::Role;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_MANAGER_ID: &str = "manager-demo-1234";
pub const DEFAULT_EMPLOYEE_ID: &str = "employee-demo-5678";

/// How the profile table was populated by [`seed_profiles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Profiles were already present; nothing was touched.
    AlreadySeeded,
    /// Seeded from the given SQL script.
    Script(String),
    /// Seeded with the default manager/employee pair.
    Defaults,
}

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

/// Populate `user_profiles` on a fresh database.
///
/// A seed script is preferred when it exists; a missing or failing script
/// falls back to the default manager/employee pair.
pub fn seed_profiles(conn: &Connection, seed_file: Option<&Path>) -> AppResult<SeedOutcome> {
    if count_profiles(conn)? > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    if let Some(path) = seed_file {
        match fs::read_to_string(path) {
            Ok(script) => match apply_seed_script(conn, &script) {
                Ok(()) if count_profiles(conn)? > 0 => {
                    info!(seed = %path.display(), "database seeded from script");
                    return Ok(SeedOutcome::Script(path.display().to_string()));
                }
                Ok(()) => warn!(seed = %path.display(), "seed script inserted no profiles"),
                Err(e) => warn!(seed = %path.display(), error = %e, "seed script failed"),
            },
            Err(e) => warn!(seed = %path.display(), error = %e, "seed file not readable"),
        }
    }

    seed_defaults(conn)?;
    Ok(SeedOutcome::Defaults)
}

/// Run a seed script atomically: a script failing halfway leaves no rows behind.
fn apply_seed_script(conn: &Connection, script: &str) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(script)?;
    tx.commit()
}

fn seed_defaults(conn: &Connection) -> AppResult<()> {
    insert_profile(
        conn,
        &UserProfile::new(DEFAULT_MANAGER_ID, "Default Manager", Role::Manager, None),
    )?;
    insert_profile(
        conn,
        &UserProfile::new(
            DEFAULT_EMPLOYEE_ID,
            "Demo Employee",
            Role::Employee,
            Some(DEFAULT_MANAGER_ID),
        ),
    )?;
    info!(
        manager = DEFAULT_MANAGER_ID,
        employee = DEFAULT_EMPLOYEE_ID,
        "seeded default profiles"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::load_profile;

    #[test]
    fn seeds_defaults_once() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        assert_eq!(seed_profiles(&conn, None).unwrap(), SeedOutcome::Defaults);
        assert_eq!(seed_profiles(&conn, None).unwrap(), SeedOutcome::AlreadySeeded);

        let emp = load_profile(&conn, DEFAULT_EMPLOYEE_ID).unwrap().unwrap();
        assert_eq!(emp.role, Role::Employee);
        assert_eq!(emp.reports_to.as_deref(), Some(DEFAULT_MANAGER_ID));
    }

    #[test]
    fn failing_seed_script_is_rolled_back_before_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let mut path = std::env::temp_dir();
        path.push("rtimesheet_partial_seed.sql");
        fs::write(
            &path,
            "INSERT INTO user_profiles (id, name, role, reports_to)
                 VALUES ('manager-demo-1234', 'Scripted Manager', 'Manager', NULL);
             INSERT INTO user_profiles (id, name, role, reports_to)
                 VALUES ('broken', 'Broken', 'Intern', NULL);",
        )
        .unwrap();

        let outcome = seed_profiles(&conn, Some(&path)).unwrap();
        assert_eq!(outcome, SeedOutcome::Defaults);

        let mgr = load_profile(&conn, DEFAULT_MANAGER_ID).unwrap().unwrap();
        assert_eq!(mgr.name, "Default Manager");
        assert!(load_profile(&conn, "broken").unwrap().is_none());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_seed_file_falls_back() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let outcome = seed_profiles(&conn, Some(Path::new("/nonexistent/seed_data.sql"))).unwrap();
        assert_eq!(outcome, SeedOutcome::Defaults);
    }
}
