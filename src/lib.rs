//! rShiftLog library root.
//! Exposes the CLI parser, the high-level run() function and the
//! store/engine modules used by the commands and the tests.

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
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Machine { .. } => commands::machine::handle(&cli.command, cfg),
        Commands::Cause { .. } => commands::cause::handle(&cli.command, cfg),
        Commands::Record { .. } => commands::record::handle(&cli.command, cfg),
        Commands::Del { .. } => commands::del::handle(&cli.command, cfg),
        Commands::Summary { .. } | Commands::History { .. } => {
            commands::summary::handle(&cli.command, cfg)
        }
        Commands::Breakdown { .. }
        | Commands::Report { .. }
        | Commands::Trend { .. }
        | Commands::Matrix { .. }
        | Commands::Compare { .. } => commands::report::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the configuration, every other command reads it
    let mut cfg = if matches!(cli.command, Commands::Init) {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
