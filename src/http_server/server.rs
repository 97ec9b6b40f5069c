//! # HTTP Server
//!
//! Combines the site, API and health routers behind the gate.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::auth_routes::auth_routes;
use super::config::ServerConfig;
use super::contact_routes::contact_routes;
use super::content_routes::content_routes;
use super::errors::ServerError;
use super::observability_routes::health_routes;
use super::site_routes::site_routes;
use super::state::AppState;
use crate::gate::gate_middleware;

/// HTTP server for the portfolio site and its admin API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Build state from configuration and assemble the router
    pub fn from_config(config: ServerConfig) -> Result<Self, ServerError> {
        let state = Arc::new(AppState::from_config(&config)?);
        Ok(Self::with_state(config, state))
    }

    /// Assemble the router around existing state
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), ServerError> {
        let address = self.config.socket_addr();
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(address.clone()))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "server listening");
        info!("portfolio at http://{}/, admin at http://{}/admin", addr, addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

/// Build the combined router.
///
/// The gate wraps every route; it only consults the config source for
/// paths its policy protects.
pub fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api = Router::new()
        .merge(content_routes(state.clone()))
        .merge(contact_routes(state.clone()))
        .nest("/auth", auth_routes(state.clone()));

    Router::new()
        .merge(health_routes())
        .merge(site_routes(state.clone()))
        .nest("/api", api)
        .layer(from_fn_with_state(state.gate.clone(), gate_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::from_config(ServerConfig::with_port(8080)).unwrap();
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_health_is_not_gated() {
        // Unconfigured source with fail-closed would block any gated path
        let mut config = ServerConfig::default();
        config.gate.fail_closed = true;
        let router = HttpServer::from_config(config).unwrap().router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
