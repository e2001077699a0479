#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtimesheet::db::initialize::{DEFAULT_EMPLOYEE_ID, DEFAULT_MANAGER_ID, init_db, seed_profiles};
use rtimesheet::db::pool::DbPool;
use rtimesheet::db::queries::insert_profile;
use rtimesheet::models::profile::UserProfile;
use rtimesheet::models::role::Role;
use rtimesheet::tools::Dispatcher;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const MANAGER: &str = DEFAULT_MANAGER_ID;
pub const EMPLOYEE: &str = DEFAULT_EMPLOYEE_ID;
pub const MANAGER_2: &str = "manager-two-9999";
pub const EMPLOYEE_2: &str = "employee-two-4321";

pub fn rti() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB through the CLI (schema plus default profiles)
pub fn init_cli_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB through the library with the default pair plus a second
/// manager and one of their reports.
pub fn init_team_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("create db");
    init_db(&pool.conn).expect("init db");
    seed_profiles(&pool.conn, None).expect("seed profiles");
    insert_profile(
        &pool.conn,
        &UserProfile::new(MANAGER_2, "Second Manager", Role::Manager, None),
    )
    .expect("insert manager 2");
    insert_profile(
        &pool.conn,
        &UserProfile::new(EMPLOYEE_2, "Second Employee", Role::Employee, Some(MANAGER_2)),
    )
    .expect("insert employee 2");
    db_path
}

pub fn dispatcher(db_path: &str) -> Dispatcher {
    Dispatcher::open(db_path, 1000)
}
