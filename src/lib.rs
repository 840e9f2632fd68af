//! staffcheck library root.
//! Exposes the CLI parser, the high-level `run()` function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Staff { action } => commands::staff::handle(action, cfg),
        Commands::Plan { .. } => commands::plan::handle(cli, cfg),
        Commands::Wakeup { .. }
        | Commands::Depart { .. }
        | Commands::Arrive { .. }
        | Commands::Report { .. } => commands::stage::handle(cli, cfg),
        Commands::Status { .. } => commands::status::handle(cli, cfg),
        Commands::Complete { .. } => commands::complete::handle(cli, cfg),
        Commands::NewDay => commands::new_day::handle(cli, cfg),
        Commands::History { .. } => commands::history::handle(cli, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Shift { action } => commands::shift::handle(action, cli, cfg),
        Commands::Alerts => commands::alerts::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once, then overridden from the command line
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    cfg.database = cfg.database_path().to_string_lossy().to_string();

    dispatch(&cli, &cfg)
}
