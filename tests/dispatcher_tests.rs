use rtimesheet::tools::Dispatcher;
use serde_json::json;

mod common;
use common::{EMPLOYEE, MANAGER, dispatcher, init_team_db, setup_test_db};

#[test]
fn test_call_submit_and_approve_by_name() {
    let db = init_team_db("call_submit_approve");
    let mut d = dispatcher(&db);

    let submitted = d.call(
        "submit_timesheet",
        json!({"user_id": EMPLOYEE, "hours": "7.5", "task": "Docs"}),
    );
    assert_eq!(submitted["status"], "success");
    assert_eq!(submitted["timesheet"]["hours"], 7.5);
    assert_eq!(submitted["timesheet"]["status"], "Pending");
    assert_eq!(submitted["timesheet"]["manager_id"], MANAGER);
    let id = submitted["timesheet_id"].as_str().unwrap().to_string();

    let pending = d.call("list_pending_approvals", json!({"manager_id": MANAGER}));
    assert_eq!(pending["status"], "success");
    assert_eq!(pending["pending_sheets"][0]["id"], id.as_str());
    assert_eq!(pending["pending_sheets"][0]["employee_name"], "Demo Employee");

    let updated = d.call(
        "update_status",
        json!({"manager_id": MANAGER, "timesheet_id": id, "new_status": "Approved"}),
    );
    assert_eq!(updated["status"], "success");
    assert_eq!(updated["new_status"], "Approved");

    let again = d.call(
        "update_status",
        json!({"manager_id": MANAGER, "timesheet_id": id, "new_status": "Rejected"}),
    );
    assert_eq!(again["status"], "error");
    assert_eq!(again["error_kind"], "IMMUTABLE_STATE");

    let dash = d.call("view_dashboard", json!({"user_id": EMPLOYEE}));
    assert_eq!(dash["approved_hours_last_30_days"], 7.5);
    assert_eq!(dash["pending_count"], 0);
}

#[test]
fn test_call_legacy_names_and_bad_arguments() {
    let db = init_team_db("call_legacy_names");
    let mut d = dispatcher(&db);

    let dash = d.call("tool_view_queries", json!({"user_id": EMPLOYEE}));
    assert_eq!(dash["status"], "success");
    assert_eq!(dash["manager_name"], "Default Manager");

    let missing = d.call("submit_timesheet", json!({"user_id": EMPLOYEE}));
    assert_eq!(missing["error_kind"], "INVALID_ARGUMENT");

    let bad_hours = d.call(
        "tool_submit_timesheet",
        json!({"user_id": EMPLOYEE, "hours": "a lot"}),
    );
    assert_eq!(bad_hours["error_kind"], "INVALID_ARGUMENT");

    let denied = d.call("tool_manager_approval", json!({"manager_id": EMPLOYEE}));
    assert_eq!(denied["error_kind"], "PERMISSION_DENIED");
    assert_eq!(
        denied["error_message"],
        "ACCESS DENIED: You must have the 'Manager' role to perform approvals."
    );

    let unknown = d.call("drop_all_tables", json!({}));
    assert_eq!(unknown["error_kind"], "INVALID_ARGUMENT");
}

#[test]
fn test_missing_database_is_unavailable() {
    let db = setup_test_db("call_missing_db");
    let mut d = Dispatcher::open(&db, 1000);

    let v = d.call("view_dashboard", json!({"user_id": EMPLOYEE}));
    assert_eq!(
        v,
        json!({
            "status": "error",
            "error_kind": "STORE_UNAVAILABLE",
            "error_message": "Database connection not available"
        })
    );
    // Opening must not have created the file.
    assert!(!std::path::Path::new(&db).exists());
}
