pub mod call;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod decide;
pub mod init;
pub mod log;
pub mod submit;
pub mod timesheets;
pub mod users;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::tools::Dispatcher;

/// The acting user: `--as` or the configured default.
pub fn actor(cli: &Cli, cfg: &Config) -> String {
    cli.actor
        .clone()
        .unwrap_or_else(|| cfg.default_user.clone())
}

pub fn open_dispatcher(cfg: &Config) -> Dispatcher {
    Dispatcher::open(&cfg.database, cfg.busy_timeout_ms)
}

/// Open an initialized database directly (for commands outside the tool surface).
pub fn open_store(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::open_existing(&cfg.database, cfg.busy_timeout_ms)
        .map_err(|_| AppError::StoreUnavailable)?;
    if !pool.ping()? {
        return Err(AppError::StoreUnavailable);
    }
    Ok(pool)
}
