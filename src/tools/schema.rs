//! JSON-schema descriptions of the tools, for a conversational caller that
//! needs to know which operations exist and what they take.

use super::args::ToolName;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

pub fn tool_schema(tool: ToolName) -> ToolSchema {
    match tool {
        ToolName::ViewDashboard => ToolSchema {
            name: tool.as_str(),
            description: "Retrieves the current user's timesheet dashboard: pending count, \
                approved hours over the last 30 days, manager name and recent submissions. \
                Use for any status or history query.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "The unique ID of the employee querying the data."}
                },
                "required": ["user_id"]
            }),
        },
        ToolName::SubmitTimesheet => ToolSchema {
            name: tool.as_str(),
            description: "Creates and submits a new timesheet entry for approval. \
                Use for logging or adding hours.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "The unique ID of the employee submitting the sheet."},
                    "hours": {"type": "number", "description": "The number of hours worked, between 0.5 and 24 (e.g. 8.0)."},
                    "date": {"type": "string", "description": "The date of work in YYYY-MM-DD format. Defaults to today."},
                    "task": {"type": "string", "description": "A description of the task performed. Defaults to 'Unspecified project work.'"}
                },
                "required": ["user_id", "hours"]
            }),
        },
        ToolName::ListPendingApprovals => ToolSchema {
            name: tool.as_str(),
            description: "Lists the pending timesheets assigned to a manager for review. \
                Requires the Manager role.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "manager_id": {"type": "string", "description": "The unique ID of the manager reviewing timesheets."}
                },
                "required": ["manager_id"]
            }),
        },
        ToolName::UpdateStatus => ToolSchema {
            name: tool.as_str(),
            description: "Approves or rejects a pending timesheet by its ID. \
                Requires the Manager role and ownership of the timesheet.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "manager_id": {"type": "string", "description": "The unique ID of the manager performing the action."},
                    "timesheet_id": {"type": "string", "description": "The unique ID of the timesheet to update."},
                    "new_status": {"type": "string", "enum": ["Approved", "Rejected"], "description": "The new status to set."}
                },
                "required": ["manager_id", "timesheet_id", "new_status"]
            }),
        },
    }
}

pub fn tool_schemas() -> Vec<ToolSchema> {
    ToolName::ALL.iter().map(|t| tool_schema(*t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_a_schema_with_required_args() {
        let schemas = tool_schemas();
        assert_eq!(schemas.len(), 4);

        let submit = schemas.iter().find(|s| s.name == "submit_timesheet").unwrap();
        assert_eq!(submit.parameters["required"], json!(["user_id", "hours"]));

        let update = schemas.iter().find(|s| s.name == "update_status").unwrap();
        assert_eq!(
            update.parameters["required"],
            json!(["manager_id", "timesheet_id", "new_status"])
        );
    }
}
