use crate::db::queries::{list_profiles, load_profile};
use crate::errors::AppResult;
use crate::models::profile::UserProfile;
use rusqlite::Connection;
use tracing::warn;

/// Resolves user ids to profiles and display names.
pub struct Directory<'a> {
    conn: &'a Connection,
}

impl<'a> Directory<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn resolve_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        load_profile(self.conn, user_id)
    }

    /// Display name for `user_id`; unknown ids get a placeholder and this never fails.
    pub fn resolve_name(&self, user_id: Option<&str>) -> String {
        let Some(id) = user_id.filter(|id| !id.is_empty()) else {
            return fallback_name("");
        };

        match load_profile(self.conn, id) {
            Ok(Some(profile)) => profile.name,
            Ok(None) => fallback_name(id),
            Err(e) => {
                warn!(user_id = id, error = %e, "name lookup failed, using placeholder");
                fallback_name(id)
            }
        }
    }

    pub fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        list_profiles(self.conn)
    }
}

/// Placeholder name derived from the id: `User-` plus its first four characters.
pub fn fallback_name(user_id: &str) -> String {
    format!("User-{}", user_id.chars().take(4).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::{DEFAULT_EMPLOYEE_ID, init_db, seed_profiles};

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        seed_profiles(&conn, None).unwrap();
        conn
    }

    #[test]
    fn resolves_known_names() {
        let conn = seeded();
        let dir = Directory::new(&conn);
        assert_eq!(dir.resolve_name(Some(DEFAULT_EMPLOYEE_ID)), "Demo Employee");
    }

    #[test]
    fn unknown_and_empty_ids_fall_back() {
        let conn = seeded();
        let dir = Directory::new(&conn);
        assert_eq!(dir.resolve_name(Some("ghost-99")), "User-ghos");
        assert_eq!(dir.resolve_name(Some("")), "User-");
        assert_eq!(dir.resolve_name(None), "User-");
        assert!(dir.resolve_profile("ghost-99").unwrap().is_none());
    }

    #[test]
    fn broken_store_still_yields_a_name() {
        let conn = Connection::open_in_memory().unwrap();
        let dir = Directory::new(&conn);
        assert_eq!(dir.resolve_name(Some("abcdef")), "User-abcd");
    }
}
