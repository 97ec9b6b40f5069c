//! # HTTP Server Module
//!
//! Axum server for the public portfolio, the admin panel and the JSON API.
//!
//! # Endpoints
//!
//! - `/health` - Health check (never gated)
//! - `/` - Portfolio page (gated)
//! - `/admin`, `/admin/:section` - Admin pages (gated, admin session)
//! - `/api/profile`, `/api/{projects,experience,education,skills}` - Content CRUD
//! - `/api/contact` - Contact form and inbox
//! - `/api/auth/*` - Login, logout and session

pub mod auth_routes;
pub mod config;
pub mod contact_routes;
pub mod content_routes;
pub mod errors;
pub mod observability_routes;
pub mod render;
pub mod server;
pub mod site_routes;
pub mod state;

pub use config::{AdminAccount, ConfigError, ServerConfig};
pub use errors::{ApiError, ApiResult, ServerError};
pub use server::{build_router, HttpServer};
pub use state::{config_source, AppState, SESSION_COOKIE};
