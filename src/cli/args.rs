//! CLI argument definitions using clap
//!
//! Commands:
//! - folio serve --config <path> [--seed]
//! - folio seed --config <path>
//! - folio gate --config <path> [--path /]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio - a personal portfolio site with a maintenance gate
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./folio.json")]
        config: PathBuf,

        /// Load demo content first if the store is empty
        #[arg(long)]
        seed: bool,
    },

    /// Load demo content into the persisted store and exit
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./folio.json")]
        config: PathBuf,
    },

    /// Evaluate the gate once for a path and print the decision
    Gate {
        /// Path to configuration file
        #[arg(long, default_value = "./folio.json")]
        config: PathBuf,

        /// Request path to evaluate
        #[arg(long, default_value = "/")]
        path: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
