//! CLI argument definitions using clap
//!
//! Commands:
//! - aerofind repl [--config <path>] [--data <path>]
//! - aerofind query --prefix <p> [--filter <f>] [--config <path>] [--data <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aerofind - prefix search over an airport collection with filters
#[derive(Parser, Debug)]
#[command(name = "aerofind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive prompt loop: filter, then prefix, per query
    Repl {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the airports CSV (overrides the config)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Execute a single query and exit
    Query {
        /// Name prefix to search under (empty enumerates everything)
        #[arg(long, default_value = "")]
        prefix: String,

        /// Filter expression (empty means no filter)
        #[arg(long, default_value = "")]
        filter: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the airports CSV (overrides the config)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
