//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::gate::{decide, ConfigSnapshot, Gate, GateDecision};
use crate::http_server::{config_source, AppState, HttpServer, ServerConfig};
use crate::store::{seed_demo, PortfolioStore, StoreCounts};

/// Main CLI entry point
///
/// Installs the log subscriber, parses arguments and dispatches.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Logs go to stderr so one-shot commands keep stdout for JSON.
/// `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, seed } => serve(&config, seed),
        Command::Seed { config } => seed(&config),
        Command::Gate { config, path } => gate(&config, &path),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server, optionally seeding an empty store first
pub fn serve(config_path: &Path, seed: bool) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    let state = Arc::new(AppState::from_config(&config)?);

    if seed && seed_demo(&state.store)? {
        info!("demo content loaded");
    }

    let server = HttpServer::with_state(config, state);
    runtime()?.block_on(server.start())?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedReport {
    seeded: bool,
    counts: StoreCounts,
}

/// Seed the persisted store and exit
pub fn seed(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    let data_path = config.data_path.as_ref().ok_or_else(|| {
        CliError::config_error("seed needs a persisted store: set dataPath or FOLIO_DATA_PATH")
    })?;

    let store = PortfolioStore::open(data_path)?;
    let seeded = seed_demo(&store)?;
    write_response(&SeedReport {
        seeded,
        counts: store.counts()?,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GateReport {
    path: String,
    protected: bool,
    fail_closed: bool,
    snapshot: Option<ConfigSnapshot>,
    decision: GateDecision,
}

/// Evaluate the gate once for `path` and print snapshot and decision
pub fn gate(config_path: &Path, path: &str) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    let gate = Gate::new(config_source(&config)?, config.gate.clone());
    let protected = gate.policy().protected.matches(path);

    let (snapshot, decision) = if protected {
        let snapshot = runtime()?.block_on(gate.snapshot());
        let decision = decide(&snapshot, gate.policy());
        (Some(snapshot), decision)
    } else {
        (None, GateDecision::Allow { annotations: Vec::new() })
    };

    write_response(&GateReport {
        path: path.to_string(),
        protected,
        fail_closed: gate.policy().fail_closed,
        snapshot,
        decision,
    })
}
