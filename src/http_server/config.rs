//! Server Configuration
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables. Every field has a default so an empty file is valid.

use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::edge_config::HttpSourceSettings;
use crate::gate::GatePolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidEnv { key: String, reason: String },
}

/// Admin account created or reset at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub email: String,

    #[serde(default = "default_admin_name")]
    pub name: String,

    pub password: String,
}

fn default_admin_name() -> String {
    "Admin User".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Token signing secret; random per process when unset
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in minutes (default: 480)
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// JSON file backing the record store; memory only when unset
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Remote config store
    #[serde(default)]
    pub edge_config: Option<HttpSourceSettings>,

    /// Local JSON file standing in for the remote config store
    #[serde(default)]
    pub local_edge_config: Option<PathBuf>,

    #[serde(default)]
    pub gate: GatePolicy,

    #[serde(default)]
    pub admin: Option<AdminAccount>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl_minutes() -> i64 {
    480
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            jwt_secret: None,
            token_ttl_minutes: default_token_ttl_minutes(),
            data_path: None,
            edge_config: None,
            local_edge_config: None,
            gate: GatePolicy::default(),
            admin: None,
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Read `path` if it exists, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FOLIO_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "FOLIO_PORT")? {
            self.port = port;
        }
        if let Some(secret) = lookup("FOLIO_JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Some(path) = lookup("FOLIO_DATA_PATH") {
            self.data_path = Some(PathBuf::from(path));
        }
        if let Some(fail_closed) = parse_var(&lookup, "FOLIO_FAIL_CLOSED")? {
            self.gate.fail_closed = fail_closed;
        }

        if let Some(endpoint) = lookup("EDGE_CONFIG_URL") {
            let settings = self.edge_config.get_or_insert_with(|| HttpSourceSettings {
                endpoint: endpoint.clone(),
                token: None,
                timeout_ms: 1000,
            });
            settings.endpoint = endpoint;
        }
        if let Some(token) = lookup("EDGE_CONFIG_TOKEN") {
            match self.edge_config.as_mut() {
                Some(settings) => settings.token = Some(token),
                None => warn!("EDGE_CONFIG_TOKEN set without EDGE_CONFIG_URL, ignoring"),
            }
        }

        if let (Some(email), Some(password)) =
            (lookup("FOLIO_ADMIN_EMAIL"), lookup("FOLIO_ADMIN_PASSWORD"))
        {
            self.admin = Some(AdminAccount {
                email,
                name: default_admin_name(),
                password,
            });
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                key: key.to_string(),
                reason: e.to_string(),
            }),
    }
}
