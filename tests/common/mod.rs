//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use folio::auth::crypto::PasswordPolicy;
use folio::auth::{
    AuthService, InMemoryUserRepository, JwtConfig, LoginRequest, Role, User, UserRepository,
};
use folio::edge_config::{ConfigSource, InMemoryConfigSource};
use folio::gate::{Gate, GatePolicy};
use folio::http_server::{build_router, AppState, ServerConfig};
use folio::store::PortfolioStore;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_EMAIL: &str = "visitor@example.com";
pub const USER_PASSWORD: &str = "visitor-password";

/// Full application router wired to an in-memory config source
pub struct TestApp {
    pub router: Router,
    pub source: Arc<InMemoryConfigSource>,
    pub store: Arc<PortfolioStore>,
    pub auth: Arc<AuthService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(GatePolicy::default())
    }

    pub fn with_policy(policy: GatePolicy) -> Self {
        Self::with_store(policy, PortfolioStore::in_memory())
    }

    pub fn with_store(policy: GatePolicy, store: PortfolioStore) -> Self {
        let source = Arc::new(InMemoryConfigSource::new());
        let password_policy = PasswordPolicy::default();
        let users = InMemoryUserRepository::new();
        users
            .create(&User::new(USER_EMAIL, "Visitor", USER_PASSWORD, Role::User, &password_policy).unwrap())
            .unwrap();
        let auth = Arc::new(AuthService::new(
            Arc::new(users),
            JwtConfig::new("integration-secret"),
            password_policy,
        ));
        auth.ensure_admin(ADMIN_EMAIL, "Admin User", ADMIN_PASSWORD)
            .unwrap();

        let store = Arc::new(store);
        let dyn_source: Arc<dyn ConfigSource> = source.clone();
        let state = Arc::new(AppState::new(
            store.clone(),
            auth.clone(),
            Arc::new(Gate::new(dyn_source, policy)),
        ));
        let router = build_router(&ServerConfig::default(), state);

        Self {
            router,
            source,
            store,
            auth,
        }
    }

    pub fn token(&self, email: &str, password: &str) -> String {
        self.auth
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .unwrap()
            .1
            .access_token
    }

    pub fn admin_token(&self) -> String {
        self.token(ADMIN_EMAIL, ADMIN_PASSWORD)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
