//! Contact HTTP Routes
//!
//! Public message submission plus the admin inbox.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use tracing::info;

use super::content_routes::parse_id;
use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::store::{ContactInput, ContactMessage};

const KIND: &str = "message";

/// Contact routes, mounted under `/api`
pub fn contact_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contact", get(list_messages).post(submit_message))
        .route("/contact/:id", patch(mark_read).delete(delete_message))
        .with_state(state)
}

async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<ContactMessage>>> {
    state.require_admin(&headers)?;
    let messages = state
        .store
        .messages()
        .map_err(|e| ApiError::store("fetch contacts", e))?;
    Ok(Json(messages))
}

async fn submit_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContactMessage>)> {
    let Json(input) = payload?;
    let message = state
        .store
        .submit_message(input)
        .map_err(|e| ApiError::store("create contact", e))?;

    info!(id = %message.id, "contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<ContactMessage>> {
    state.require_admin(&headers)?;
    let id = parse_id(&id, KIND).map_err(|e| ApiError::store("update contact", e))?;
    let message = state
        .store
        .mark_message_read(id)
        .map_err(|e| ApiError::store("update contact", e))?;
    Ok(Json(message))
}

async fn delete_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let ctx = state.require_admin(&headers)?;
    let id = parse_id(&id, KIND).map_err(|e| ApiError::store("delete contact", e))?;
    state
        .store
        .delete_message(id)
        .map_err(|e| ApiError::store("delete contact", e))?;

    info!(user = %ctx.email, %id, "contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthService, JwtConfig, LoginRequest};
    use crate::edge_config::UnconfiguredSource;
    use crate::gate::{Gate, GatePolicy};
    use crate::store::PortfolioStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, String, String) {
        let auth = AuthService::in_memory(JwtConfig::new("contact-test-secret"));
        auth.ensure_admin("admin@example.com", "Admin", "admin-password")
            .unwrap();
        auth.register("visitor@example.com", "Visitor", "visitor-password")
            .unwrap();
        let token = |email: &str, password: &str| {
            auth.login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .unwrap()
            .1
            .access_token
        };
        let admin = token("admin@example.com", "admin-password");
        let visitor = token("visitor@example.com", "visitor-password");

        let state = AppState::new(
            Arc::new(PortfolioStore::in_memory()),
            Arc::new(auth),
            Arc::new(Gate::new(Arc::new(UnconfiguredSource), GatePolicy::default())),
        );
        (contact_routes(Arc::new(state)), admin, visitor)
    }

    fn get(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/contact");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn submit(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_inbox_access() {
        let (app, admin, visitor) = app();

        let response = app.clone().oneshot(get(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.clone().oneshot(get(Some(&visitor))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Unauthorized");

        let response = app.oneshot(get(Some(&admin))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submit_and_mark_read() {
        let (app, admin, _) = app();

        let response = app
            .clone()
            .oneshot(submit(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "message": "Hello there"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created["read"], false);

        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/contact/{}", created["id"].as_str().unwrap()))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let updated: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated["read"], true);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_email() {
        let (app, _, _) = app();
        let response = app
            .oneshot(submit(json!({
                "name": "Grace",
                "email": "not-an-email",
                "message": "Hello"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
