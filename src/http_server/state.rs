//! Shared application state and request credential helpers.

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::Duration;
use tracing::{info, warn};

use super::config::ServerConfig;
use super::errors::ServerError;
use crate::auth::{AuthContext, AuthResult, AuthService, JwtConfig};
use crate::edge_config::{ConfigSource, HttpConfigSource, InMemoryConfigSource, UnconfiguredSource};
use crate::gate::Gate;
use crate::store::PortfolioStore;

/// Cookie carrying the access token for admin pages
pub const SESSION_COOKIE: &str = "folio_session";

/// State shared by every router
pub struct AppState {
    pub store: Arc<PortfolioStore>,
    pub auth: Arc<AuthService>,
    pub gate: Arc<Gate>,
}

impl AppState {
    pub fn new(store: Arc<PortfolioStore>, auth: Arc<AuthService>, gate: Arc<Gate>) -> Self {
        Self { store, auth, gate }
    }

    /// Assemble store, auth and gate from configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let store = match &config.data_path {
            Some(path) => {
                info!(path = %path.display(), "opening persisted store");
                PortfolioStore::open(path)?
            }
            None => {
                warn!("no data path configured, records are kept in memory only");
                PortfolioStore::in_memory()
            }
        };

        let mut jwt = match &config.jwt_secret {
            Some(secret) => JwtConfig::new(secret.clone()),
            None => {
                warn!("no JWT secret configured, using a random secret for this process");
                JwtConfig::default()
            }
        };
        jwt.access_token_ttl = Duration::minutes(config.token_ttl_minutes);

        let auth = AuthService::in_memory(jwt);
        match &config.admin {
            Some(admin) => {
                auth.ensure_admin(&admin.email, &admin.name, &admin.password)?;
            }
            None => warn!("no admin account configured, admin routes are unreachable"),
        }

        let gate = Gate::new(config_source(config)?, config.gate.clone());

        Ok(Self::new(Arc::new(store), Arc::new(auth), Arc::new(gate)))
    }

    /// Admin check for API routes: bearer token only
    pub fn require_admin(&self, headers: &HeaderMap) -> AuthResult<AuthContext> {
        self.auth.authorize_admin(bearer_token(headers))
    }

    /// Admin check for HTML pages: bearer token or session cookie
    pub fn require_admin_page(&self, headers: &HeaderMap) -> AuthResult<AuthContext> {
        let token = bearer_token(headers).or_else(|| session_cookie(headers));
        self.auth.authorize_admin(token)
    }
}

/// Config source chosen by configuration, falling back to unconfigured
pub fn config_source(config: &ServerConfig) -> Result<Arc<dyn ConfigSource>, ServerError> {
    if let Some(settings) = &config.edge_config {
        info!(endpoint = %settings.endpoint, "using remote config source");
        return Ok(Arc::new(HttpConfigSource::new(settings)?));
    }
    if let Some(path) = &config.local_edge_config {
        info!(path = %path.display(), "using local config source");
        return Ok(Arc::new(InMemoryConfigSource::from_file(path)?));
    }
    warn!("no config source configured, gate will treat every key as unavailable");
    Ok(Arc::new(UnconfiguredSource))
}

/// Extract Bearer token from Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract the session token from the Cookie header
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value storing a session token
pub fn session_cookie_header(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}
