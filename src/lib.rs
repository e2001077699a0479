//! rTimesheet library root.
//! Exposes the CLI parser, the tool dispatcher, the high-level run() function
//! and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod tools;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Users | Commands::AddUser { .. } | Commands::Role { .. } => {
            commands::users::handle(cli, cfg)
        }
        Commands::Dashboard => commands::dashboard::handle(cli, cfg),
        Commands::Submit { .. } => commands::submit::handle(cli, cfg),
        Commands::List { .. } => commands::timesheets::handle_list(cli, cfg),
        Commands::Pending => commands::timesheets::handle_pending(cli, cfg),
        Commands::Approve { .. } | Commands::Reject { .. } => commands::decide::handle(cli, cfg),
        Commands::Call { .. } => commands::call::handle_call(&cli.command, cfg),
        Commands::Tools => commands::call::handle_tools(),
    }
}

/// Diagnostics go to stderr so that `call` output stays machine readable.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    init_tracing(&cfg.log_level);

    dispatch(&cli, &cfg)
}
