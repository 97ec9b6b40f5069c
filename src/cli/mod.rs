//! CLI module for folio
//!
//! Provides command-line interface for:
//! - serve: run the HTTP server
//! - seed: load demo content into the persisted store
//! - gate: evaluate the request gate once and print the decision

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{gate, run, run_command, seed, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
