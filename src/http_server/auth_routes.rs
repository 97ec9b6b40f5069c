//! Auth HTTP Routes
//!
//! Login issues an access token both in the body (for API clients) and as
//! the `folio_session` cookie (for admin pages).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use super::state::{bearer_token, session_cookie, session_cookie_header, AppState};
use crate::auth::{AuthError, LoginRequest, User};

/// Auth routes, mounted under `/api/auth`
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/session", get(session_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
}

// ==================
// Handlers
// ==================

async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;
    let (user, token) = state.auth.login(request)?;

    let cookie = session_cookie_header(&token.access_token, token.expires_in);
    let body = LoginResponse {
        user,
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        expires_at: token.expires_at,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

async fn logout_handler() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, session_cookie_header("", 0))],
    )
}

/// Current user from the bearer token, falling back to the session cookie
async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<SessionResponse>> {
    let token = bearer_token(&headers)
        .or_else(|| session_cookie(&headers))
        .ok_or(ApiError::Auth(AuthError::AuthenticationRequired))?;

    let ctx = state.auth.authenticate(token)?;
    let user = state.auth.current_user(&ctx)?;
    Ok(Json(SessionResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthService, JwtConfig};
    use crate::edge_config::UnconfiguredSource;
    use crate::gate::{Gate, GatePolicy};
    use crate::store::PortfolioStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let auth = AuthService::in_memory(JwtConfig::new("auth-routes-secret"));
        auth.ensure_admin("admin@example.com", "Admin User", "admin-password")
            .unwrap();
        let state = AppState::new(
            Arc::new(PortfolioStore::in_memory()),
            Arc::new(auth),
            Arc::new(Gate::new(Arc::new(UnconfiguredSource), GatePolicy::default())),
        );
        auth_routes(Arc::new(state))
    }

    fn login(email: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": email, "password": password }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_returns_token() {
        let response = app()
            .oneshot(login("admin@example.com", "admin-password"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("folio_session="));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["user"]["role"], "admin");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(cookie.contains(body["accessToken"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let response = app()
            .oneshot(login("admin@example.com", "wrong-password"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let app = app();
        let response = app
            .clone()
            .oneshot(login("admin@example.com", "admin-password"))
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let token = body["accessToken"].as_str().unwrap();

        let request = Request::builder()
            .uri("/session")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder().uri("/session").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
