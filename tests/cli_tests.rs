use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{EMPLOYEE, MANAGER, init_cli_db, rti, setup_test_db};

/// Submit through the CLI and return the new timesheet id from the JSON envelope.
fn submit_via_call(db_path: &str, hours: &str, task: &str) -> String {
    let args = format!(
        r#"{{"user_id": "{}", "hours": "{}", "task": "{}"}}"#,
        EMPLOYEE, hours, task
    );
    let out = rti()
        .args(["--db", db_path, "call", "submit_timesheet", "--args", &args])
        .output()
        .expect("run call");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(v["status"], "success");
    v["timesheet_id"].as_str().expect("timesheet id").to_string()
}

#[test]
fn test_init_seeds_default_profiles() {
    let db_path = setup_test_db("cli_init");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rti()
        .args(["--db", &db_path, "users"])
        .assert()
        .success()
        .stdout(contains(MANAGER).and(contains(EMPLOYEE)))
        .stdout(contains("Default Manager"));

    // A second init keeps the existing profiles.
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("seeding skipped"));
}

#[test]
fn test_submit_and_dashboard() {
    let db_path = setup_test_db("cli_submit_dashboard");
    init_cli_db(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "--as",
            EMPLOYEE,
            "submit",
            "8",
            "--task",
            "Feature X",
        ])
        .assert()
        .success()
        .stdout(contains("(8.0 hours)").and(contains("Awaiting manager approval")));

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Default Manager"))
        .stdout(contains("Pending timesheets       : 1"))
        .stdout(contains("Feature X"));
}

#[test]
fn test_submit_out_of_range_fails() {
    let db_path = setup_test_db("cli_submit_range");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "submit", "25"])
        .assert()
        .failure()
        .stderr(contains("Hours must be between 0.5 and 24."));

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "submit", "-1"])
        .assert()
        .failure();
}

#[test]
fn test_approve_flow_and_terminal_state() {
    let db_path = setup_test_db("cli_approve_flow");
    init_cli_db(&db_path);

    let id = submit_via_call(&db_path, "7.5", "Code review");

    rti()
        .args(["--db", &db_path, "--as", MANAGER, "pending"])
        .assert()
        .success()
        .stdout(contains(id.as_str()).and(contains("Demo Employee")));

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "approve", &id])
        .assert()
        .failure()
        .stderr(contains("ACCESS DENIED"));

    rti()
        .args(["--db", &db_path, "--as", MANAGER, "approve", &id])
        .assert()
        .success()
        .stdout(contains("has been Approved"));

    rti()
        .args(["--db", &db_path, "--as", MANAGER, "reject", &id])
        .assert()
        .failure()
        .stderr(contains("cannot be changed"));

    rti()
        .args(["--db", &db_path, "--as", MANAGER, "list", "--team"])
        .assert()
        .success()
        .stdout(contains("Code review"));

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("approve").and(contains("submit")));
}

#[test]
fn test_list_team_requires_manager() {
    let db_path = setup_test_db("cli_list_team");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "list", "--team"])
        .assert()
        .failure()
        .stderr(contains("ACCESS DENIED"));

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "list"])
        .assert()
        .success()
        .stdout(contains("No timesheets found."));
}

#[test]
fn test_call_on_missing_database_prints_envelope() {
    let db_path = setup_test_db("cli_call_missing");

    rti()
        .args([
            "--db",
            &db_path,
            "call",
            "view_dashboard",
            "--args",
            r#"{"user_id": "x"}"#,
        ])
        .assert()
        .success()
        .stdout(contains("STORE_UNAVAILABLE"));

    rti()
        .args(["--db", &db_path, "--as", EMPLOYEE, "dashboard"])
        .assert()
        .failure()
        .stderr(contains("Database connection not available"));
}

#[test]
fn test_call_with_invalid_json() {
    let db_path = setup_test_db("cli_call_bad_json");
    init_cli_db(&db_path);

    rti()
        .args(["--db", &db_path, "call", "view_dashboard", "--args", "{oops"])
        .assert()
        .success()
        .stdout(contains("INVALID_ARGUMENT"));
}

#[test]
fn test_add_user_and_role_change() {
    let db_path = setup_test_db("cli_admin");
    init_cli_db(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "add-user",
            "lead-0001",
            "Team Lead",
            "manager",
        ])
        .assert()
        .success()
        .stdout(contains("added as Manager"));

    rti()
        .args([
            "--db",
            &db_path,
            "add-user",
            "dev-0002",
            "New Developer",
            "Employee",
            "--reports-to",
            "lead-0001",
        ])
        .assert()
        .success();

    // Demoting a manager who still has reports is refused.
    rti()
        .args(["--db", &db_path, "role", "Employee", "--user", "lead-0001"])
        .assert()
        .failure()
        .stderr(contains("direct report"));

    rti()
        .args(["--db", &db_path, "role", "Manager", "--user", EMPLOYEE])
        .assert()
        .success()
        .stdout(contains("is now Manager"));

    rti()
        .args([
            "--db",
            &db_path,
            "add-user",
            "dev-0002",
            "Dup",
            "Employee",
            "--reports-to",
            "lead-0001",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_tools_and_db_commands() {
    let db_path = setup_test_db("cli_tools_db");
    init_cli_db(&db_path);

    rti()
        .args(["tools"])
        .assert()
        .success()
        .stdout(contains("submit_timesheet").and(contains("update_status")));

    rti()
        .args(["--db", &db_path, "db", "--check", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    rti()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success();
}
