//! Administrative profile changes. These are not part of the tool surface
//! and are gated by configuration rather than by timesheet permissions.

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{count_direct_reports, insert_profile, load_profile, update_role};
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserProfile;
use crate::models::role::Role;
use rusqlite::TransactionBehavior;
use tracing::info;

pub struct AdminLogic;

impl AdminLogic {
    /// Change the role of an existing profile.
    pub fn set_role(pool: &mut DbPool, cfg: &Config, user_id: &str, role: Role) -> AppResult<UserProfile> {
        ensure_allowed(cfg)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut profile =
            load_profile(&tx, user_id)?.ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        if profile.role == role {
            return Ok(profile);
        }

        if profile.role == Role::Manager && role == Role::Employee {
            let reports = count_direct_reports(&tx, user_id)?;
            if reports > 0 {
                return Err(AppError::Conflict(format!(
                    "'{}' still has {} direct report(s) and cannot become an Employee.",
                    user_id, reports
                )));
            }
            if profile.reports_to.is_none() {
                return Err(AppError::Conflict(format!(
                    "'{}' has no manager of their own and cannot become an Employee.",
                    user_id
                )));
            }
        }

        update_role(&tx, user_id, role)?;
        ttlog(
            &tx,
            "role",
            user_id,
            &format!("Role changed from {} to {}", profile.role, role),
        )?;
        tx.commit()?;

        info!(user_id, from = %profile.role, to = %role, "role updated");
        profile.role = role;
        Ok(profile)
    }

    /// Provision a new profile.
    pub fn add_user(pool: &mut DbPool, cfg: &Config, profile: &UserProfile) -> AppResult<()> {
        ensure_allowed(cfg)?;

        let id = profile.id.trim();
        let name = profile.name.trim();
        if id.is_empty() || name.is_empty() {
            return Err(AppError::InvalidArguments(
                "user id and name must not be empty".into(),
            ));
        }

        let reports_to = profile
            .reports_to
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if profile.role == Role::Employee && reports_to.is_none() {
            return Err(AppError::Conflict(format!(
                "Employee '{}' needs a manager (--reports-to).",
                id
            )));
        }
        let profile = UserProfile::new(id, name, profile.role, reports_to);

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if load_profile(&tx, id)?.is_some() {
            return Err(AppError::Conflict(format!("User '{}' already exists.", id)));
        }

        if let Some(manager_id) = &profile.reports_to {
            match load_profile(&tx, manager_id)? {
                Some(m) if m.is_manager() => {}
                Some(_) => {
                    return Err(AppError::Conflict(format!(
                        "'{}' is not a Manager and cannot have direct reports.",
                        manager_id
                    )));
                }
                None => {
                    return Err(AppError::Conflict(format!(
                        "Manager '{}' does not exist.",
                        manager_id
                    )));
                }
            }
        }

        insert_profile(&tx, &profile)?;
        ttlog(
            &tx,
            "add_user",
            id,
            &format!("Added {} '{}'", profile.role, profile.name),
        )?;
        tx.commit()?;

        info!(user_id = id, role = %profile.role, "user added");
        Ok(())
    }
}

fn ensure_allowed(cfg: &Config) -> AppResult<()> {
    if !cfg.allow_role_changes {
        return Err(AppError::access_denied(
            "administrative profile changes are disabled in the configuration.",
        ));
    }
    Ok(())
}
