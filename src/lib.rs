//! tapfeed library root.
//! Exposes the live feed, its scheduler abstraction, the CLI parser and the
//! high-level run() function.

pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Monitor { .. } => cli::commands::monitor::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the file, so it must not fail on a broken one.
    let cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load(&Config::resolve_path(cli.config.as_deref()))?,
    };

    logging::init(&cfg.log_level);
    dispatch(&cli, &cfg)
}
