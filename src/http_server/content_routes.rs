//! Content HTTP Routes
//!
//! JSON CRUD for the profile and the ordered collections. Reads are
//! public; writes require an admin bearer token.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::store::{
    Education, Experience, Profile, ProfileInput, Project, Skill, StoreError, Stored,
};

/// Content routes, mounted under `/api`
pub fn content_routes(state: Arc<AppState>) -> Router {
    let router = Router::new().route("/profile", get(get_profile).put(put_profile));

    let router = collection::<Project>(router, "/projects");
    let router = collection::<Experience>(router, "/experience");
    let router = collection::<Education>(router, "/education");
    let router = collection::<Skill>(router, "/skills");

    router.with_state(state)
}

fn collection<T: Stored>(
    router: Router<Arc<AppState>>,
    path: &str,
) -> Router<Arc<AppState>> {
    router
        .route(path, get(list_records::<T>).post(create_record::<T>))
        .route(
            &format!("{}/:id", path),
            get(get_record::<T>)
                .put(update_record::<T>)
                .delete(delete_record::<T>),
        )
}

/// Ids that do not parse are reported the same way as unknown ids
pub(crate) fn parse_id(raw: &str, kind: &'static str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::NotFound(kind))
}

// ==================
// Profile
// ==================

async fn get_profile(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<Profile>>> {
    let profile = state
        .store
        .profile()
        .map_err(|e| ApiError::store("fetch profile", e))?;
    Ok(Json(profile))
}

async fn put_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let ctx = state.require_admin(&headers)?;
    let Json(input) = payload?;

    let profile = state
        .store
        .upsert_profile(input)
        .map_err(|e| ApiError::store("update profile", e))?;

    info!(user = %ctx.email, "profile updated");
    Ok(Json(profile))
}

// ==================
// Collections
// ==================

async fn list_records<T: Stored>(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<T>>> {
    let records = state
        .store
        .list::<T>()
        .map_err(|e| ApiError::store(format!("fetch {} records", T::KIND), e))?;
    Ok(Json(records))
}

async fn get_record<T: Stored>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<T>> {
    let action = format!("fetch {}", T::KIND);
    let id = parse_id(&id, T::KIND).map_err(|e| ApiError::store(action.clone(), e))?;
    let record = state
        .store
        .get::<T>(id)
        .map_err(|e| ApiError::store(action, e))?;
    Ok(Json(record))
}

async fn create_record<T: Stored>(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<T>)> {
    let ctx = state.require_admin(&headers)?;
    let Json(input) = payload?;

    let record = state
        .store
        .create::<T>(input)
        .map_err(|e| ApiError::store(format!("create {}", T::KIND), e))?;

    info!(user = %ctx.email, kind = T::KIND, id = %record.id(), "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record<T: Stored>(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> ApiResult<Json<T>> {
    let ctx = state.require_admin(&headers)?;
    let action = format!("update {}", T::KIND);
    let id = parse_id(&id, T::KIND).map_err(|e| ApiError::store(action.clone(), e))?;
    let Json(input) = payload?;

    let record = state
        .store
        .update::<T>(id, input)
        .map_err(|e| ApiError::store(action, e))?;

    info!(user = %ctx.email, kind = T::KIND, %id, "record updated");
    Ok(Json(record))
}

async fn delete_record<T: Stored>(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let ctx = state.require_admin(&headers)?;
    let action = format!("delete {}", T::KIND);
    let id = parse_id(&id, T::KIND).map_err(|e| ApiError::store(action.clone(), e))?;

    state
        .store
        .delete::<T>(id)
        .map_err(|e| ApiError::store(action, e))?;

    info!(user = %ctx.email, kind = T::KIND, %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
