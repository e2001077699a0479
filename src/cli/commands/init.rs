use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::initialize::{SeedOutcome, init_db, seed_profiles};
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database schema (all pending migrations)
///  - the user profiles, from a seed script or the default pair
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Init { seed } = &cli.command else {
        return Ok(());
    };

    if !cli.test {
        let path = cfg.save()?;
        success(format!("Config file: {}", path.display()));
    }

    if let Some(parent) = Path::new(&cfg.database).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    println!("⚙️  Initializing rTimesheet…");
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let seed_path: Option<PathBuf> = seed.as_deref().map(expand_tilde).or_else(|| cfg.seed_path());
    match seed_profiles(&pool.conn, seed_path.as_deref())? {
        SeedOutcome::AlreadySeeded => println!("👥 Profiles already present, seeding skipped."),
        SeedOutcome::Script(path) => success(format!("Profiles seeded from {}", path)),
        SeedOutcome::Defaults => {
            if let Some(p) = &seed_path {
                warning(format!(
                    "{} could not be applied. Seeded default manager and employee.",
                    p.display()
                ));
            } else {
                success("Seeded default manager and employee profiles.");
            }
        }
    }

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
