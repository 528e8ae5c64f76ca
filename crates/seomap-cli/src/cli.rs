//! # CLI Structure and Argument Parsing
//!
//! `seomap` generates XML sitemaps and robots.txt for every store of a
//! catalog. The CLI is built using `clap` with derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # All active stores
//! seomap --config shop.toml sitemap
//!
//! # One store, machine-readable
//! seomap sitemap --store 1 --format json
//!
//! # robots.txt and the scheduled job
//! seomap robots
//! seomap cron
//! seomap schedule --hour 4
//!
//! # Look at a generated file
//! seomap inspect pub/default-sitemap.xml
//! ```
//!
//! ## Output Formats
//!
//! - **text**: Human-readable output (default)
//! - **json**: Machine-readable JSON for scripting

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Main CLI structure for the `seomap` command
#[derive(Parser, Clone, Debug)]
#[command(name = "seomap")]
#[command(version)]
#[command(about = "seomap - XML sitemap and robots.txt generation per store", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "SEOMAP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate XML sitemaps for one store or all active stores
    Sitemap {
        /// Store id to generate (all active stores when omitted)
        #[arg(long, value_name = "ID")]
        store: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate robots.txt from configuration
    Robots,

    /// Scheduled entry point: generate all stores when cron is enabled
    Cron {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the cron expression for the scheduled job
    Schedule {
        /// Hour of day (0-23), overriding `sitemap.cron_hour`
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: Option<u8>,

        /// List the selectable hours instead
        #[arg(long, conflicts_with = "hour")]
        list_hours: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Summarize a generated sitemap or sitemap index
    Inspect {
        /// Sitemap file to read
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Output format selected for the command, if it has one.
    #[must_use]
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Sitemap { format, .. }
            | Self::Cron { format }
            | Self::Schedule { format, .. }
            | Self::Inspect { format, .. } => Some(*format),
            Self::Robots => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_sitemap_with_store_and_format() {
        let cli = Cli::try_parse_from([
            "seomap", "--config", "shop.toml", "sitemap", "--store", "2", "--format", "json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Commands::Sitemap { store, format } => {
                assert_eq!(store, Some(2));
                assert_eq!(format, OutputFormat::Json);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_schedule_rejects_out_of_range_hour() {
        assert!(Cli::try_parse_from(["seomap", "schedule", "--hour", "24"]).is_err());
        assert!(Cli::try_parse_from(["seomap", "schedule", "--hour", "23"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["seomap", "robots", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert_eq!(cli.command.format(), None);
    }
}
