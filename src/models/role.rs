use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    /// Parse a role name, case-insensitive ("manager", "Manager", ...).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Employee" => Some(Role::Employee),
            "Manager" => Some(Role::Manager),
            _ => None,
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Role::from_name("manager"), Some(Role::Manager));
        assert_eq!(Role::from_name(" Employee "), Some(Role::Employee));
        assert_eq!(Role::from_name("admin"), None);
    }

    #[test]
    fn db_strings_are_strict() {
        assert_eq!(Role::from_db_str("Manager"), Some(Role::Manager));
        assert_eq!(Role::from_db_str("manager"), None);
    }
}
