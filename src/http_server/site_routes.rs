//! Site HTTP Routes
//!
//! The public portfolio page and the admin panel pages. Both sit behind
//! the gate; the admin pages also require an admin session. The
//! `/welcome` page shows the live remote config and is never gated.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::error;

use super::render::{
    dashboard_page, message_page, portfolio_not_found_page, portfolio_page, section_page,
    welcome_page, PortfolioView, SectionRows, ADMIN_SECTIONS,
};
use super::state::AppState;
use crate::auth::AuthError;
use crate::store::{StoreError, StoreResult};

/// Site routes, mounted at the root
pub fn site_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(portfolio_handler))
        .route("/welcome", get(welcome_handler))
        .route("/admin", get(dashboard_handler))
        .route("/admin/", get(|| async { Redirect::permanent("/admin") }))
        .route("/admin/:section", get(section_handler))
        .with_state(state)
}

fn page(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}

fn store_failure(err: StoreError) -> Response {
    error!(error = %err, "failed to load page data");
    page(
        StatusCode::INTERNAL_SERVER_ERROR,
        message_page("Something went wrong", "Please try again later."),
    )
}

fn denied(err: AuthError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
    let message = if status == StatusCode::FORBIDDEN {
        "This page is only available to administrators."
    } else {
        "Sign in through /api/auth/login to continue."
    };
    page(status, message_page("Unauthorized", message))
}

fn load_portfolio(state: &AppState) -> StoreResult<Option<PortfolioView>> {
    let Some(profile) = state.store.profile()? else {
        return Ok(None);
    };
    Ok(Some(PortfolioView::new(
        profile,
        state.store.list()?,
        state.store.list()?,
        state.store.list()?,
        state.store.list()?,
    )))
}

async fn portfolio_handler(State(state): State<Arc<AppState>>) -> Response {
    match load_portfolio(&state) {
        Ok(Some(view)) => page(StatusCode::OK, portfolio_page(&view)),
        Ok(None) => page(StatusCode::OK, portfolio_not_found_page()),
        Err(e) => store_failure(e),
    }
}

async fn welcome_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.gate.snapshot().await;
    page(
        StatusCode::OK,
        welcome_page(snapshot.site_config.value(), snapshot.feature_flags.value()),
    )
}

async fn dashboard_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Err(e) = state.require_admin_page(&headers) {
        return denied(e);
    }
    match state.store.counts() {
        Ok(counts) => page(StatusCode::OK, dashboard_page(&counts)),
        Err(e) => store_failure(e),
    }
}

fn load_section(state: &AppState, section: &str) -> StoreResult<Option<SectionRows>> {
    let rows = match section {
        "profile" => SectionRows::Profile(state.store.profile()?),
        "projects" => SectionRows::Projects(state.store.list()?),
        "experience" => SectionRows::Experience(state.store.list()?),
        "education" => SectionRows::Education(state.store.list()?),
        "skills" => SectionRows::Skills(state.store.list()?),
        "messages" => SectionRows::Messages(state.store.messages()?),
        _ => return Ok(None),
    };
    Ok(Some(rows))
}

async fn section_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(section): Path<String>,
) -> Response {
    if let Err(e) = state.require_admin_page(&headers) {
        return denied(e);
    }

    let title = ADMIN_SECTIONS
        .iter()
        .find(|(slug, _)| *slug == section)
        .map(|(_, label)| *label);

    match (title, load_section(&state, &section)) {
        (Some(title), Ok(Some(rows))) => page(StatusCode::OK, section_page(title, &rows)),
        (_, Err(e)) => store_failure(e),
        _ => page(
            StatusCode::NOT_FOUND,
            message_page("Not Found", "No such admin section."),
        ),
    }
}
