use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a timesheet: created `Pending`, decided once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Status::Pending),
            "Approved" => Some(Status::Approved),
            "Rejected" => Some(Status::Rejected),
            _ => None,
        }
    }

    /// Parse a user-supplied status name, case-insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Status::Pending),
            "approved" => Some(Status::Approved),
            "rejected" => Some(Status::Rejected),
            _ => None,
        }
    }

    /// Parse the target of a manager decision: only `Approved` or `Rejected`.
    pub fn decision_from_name(s: &str) -> Option<Self> {
        Self::from_name(s).filter(|st| st.is_terminal())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Approved | Status::Rejected)
    }

    pub fn can_transition_to(&self, next: Status) -> bool {
        matches!(self, Status::Pending) && next.is_terminal()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
