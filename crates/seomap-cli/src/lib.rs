//! seomap CLI library entry point.
//!
//! The binary in `main.rs` only maps the result of [`run`] to an exit code.

pub mod error;

mod cli;
mod commands;
mod output;
mod utils;

use anyhow::Result;
use clap::Parser;
use seomap_core::{RobotsGenerator, SitemapBuilder};

pub use cli::{Cli, Commands};
pub use output::OutputFormat;

use crate::utils::loader::{load_catalog, load_config};
use crate::utils::logging::initialize_logging;

/// Parse arguments, set up logging and run the selected command.
///
/// # Errors
///
/// Returns the command's error; use [`error::exit_code_from_error`] to map
/// it to an exit code.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sitemap { store, format } => {
            let config = load_config(config_path)?;
            let catalog = load_catalog(&config)?;
            commands::sitemap::run(&SitemapBuilder::new(catalog, config), store, format)
        },
        Commands::Robots => {
            let config = load_config(config_path)?;
            let catalog = load_catalog(&config)?;
            commands::robots::run(&RobotsGenerator::new(catalog, config))
        },
        Commands::Cron { format } => {
            let config = load_config(config_path)?;
            let catalog = load_catalog(&config)?;
            commands::cron::run(&SitemapBuilder::new(catalog, config), format)
        },
        Commands::Schedule {
            hour,
            list_hours,
            format,
        } => {
            let config = load_config(config_path)?;
            let hour = hour.unwrap_or(config.sitemap.cron_hour);
            commands::schedule::run(hour, config.sitemap.cron_enabled, list_hours, format)
        },
        Commands::Inspect { file, format } => commands::inspect::run(&file, format),
    }
}
