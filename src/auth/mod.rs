//! # Auth Module
//!
//! Credential login for the admin panel.
//!
//! Users sign in with email and password and receive a short-lived JWT.
//! Mutating record operations require a token whose role is `admin`.

pub mod context;
pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod user;

pub use context::AuthContext;
pub use errors::{AuthError, AuthResult};
pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtManager};
pub use service::AuthService;
pub use user::{InMemoryUserRepository, LoginRequest, Role, User, UserRepository};
