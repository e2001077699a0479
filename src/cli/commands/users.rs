use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::core::directory::Directory;
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserProfile;
use crate::models::role::Role;
use crate::ui::messages::{header, success};
use crate::utils::table::Table;

use super::{actor, open_store};

/// Handle `users`, `add-user` and `role`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Users => {
            let pool = open_store(cfg)?;
            let profiles = Directory::new(&pool.conn).list_profiles()?;

            header("👥 User profiles");
            let mut table = Table::new(&["ID", "NAME", "ROLE", "REPORTS TO"]);
            for p in profiles {
                table.add_row(vec![
                    p.id,
                    p.name,
                    p.role.to_string(),
                    p.reports_to.unwrap_or_else(|| "-".to_string()),
                ]);
            }
            print!("{}", table.render());
        }

        Commands::AddUser {
            id,
            name,
            role,
            reports_to,
        } => {
            let role = parse_role(role)?;
            let mut pool = open_store(cfg)?;
            let profile = UserProfile::new(id, name, role, reports_to.as_deref());
            AdminLogic::add_user(&mut pool, cfg, &profile)?;
            success(format!("User '{}' added as {}.", profile.id, profile.role));
        }

        Commands::Role { role, user } => {
            let role = parse_role(role)?;
            let user_id = user.clone().unwrap_or_else(|| actor(cli, cfg));
            let mut pool = open_store(cfg)?;
            let profile = AdminLogic::set_role(&mut pool, cfg, &user_id, role)?;
            success(format!(
                "Role for '{}' ({}) is now {}.",
                profile.id, profile.name, profile.role
            ));
        }

        _ => {}
    }

    Ok(())
}

fn parse_role(raw: &str) -> AppResult<Role> {
    Role::from_name(raw).ok_or_else(|| AppError::InvalidRole(raw.to_string()))
}
