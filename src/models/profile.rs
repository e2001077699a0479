use super::role::Role;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,         // ⇔ user_profiles.id
    pub name: String,       // ⇔ user_profiles.name
    pub role: Role,         // ⇔ user_profiles.role ('Employee' | 'Manager')
    pub reports_to: Option<String>, // ⇔ user_profiles.reports_to (NULL for top-level managers)
}

impl UserProfile {
    pub fn new(id: &str, name: &str, role: Role, reports_to: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
            reports_to: reports_to.map(str::to_string),
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }
}
