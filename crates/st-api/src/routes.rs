//! HTTP routes and handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use st_core::StatusUpdate;
use st_store::StatusService;

use crate::error::ApiError;
use crate::hydra::{self, Links};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<StatusService>,
    links: Links,
}

impl AppState {
    #[must_use]
    pub fn new(service: StatusService, links: Links) -> Self {
        Self {
            service: Arc::new(service),
            links,
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/vocab", get(vocab))
        .route("/health", get(health))
        .route("/user/:username", get(user))
        .route(
            "/user/:username/timestatus",
            get(timestatus).put(put_timestatus),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn index(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let accounts = state.service.list_accounts()?;
    let doc = hydra::index_doc(&state.links, &accounts);
    Ok(Json(hydra::envelope(&state.links, doc)))
}

async fn vocab(State(state): State<AppState>) -> Json<Value> {
    Json(hydra::envelope(&state.links, hydra::vocab_doc()))
}

async fn user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let account = state
        .service
        .get_account(&username)?
        .ok_or(ApiError::NotFound)?;
    let status = state
        .service
        .get_time_status(&username)?
        .ok_or(ApiError::NotFound)?;
    let doc = hydra::user_doc(&state.links, &account, status);
    Ok(Json(hydra::envelope(&state.links, doc)))
}

async fn timestatus(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let status = state
        .service
        .get_time_status(&username)?
        .ok_or(ApiError::NotFound)?;
    let doc = hydra::timestatus_doc(&state.links, &username, status);
    Ok(Json(hydra::envelope(&state.links, doc)))
}

/// Applies a partial update; 204 regardless of whether the account is
/// listed, matching the original service (the store does not validate
/// the username exists before writing).
async fn put_timestatus(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<StatusCode, ApiError> {
    state.service.update_time_status(&username, &update)?;
    Ok(StatusCode::NO_CONTENT)
}
