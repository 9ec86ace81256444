//! User handlers
//!
//! Creating a user is the one unauthenticated write, so a fresh deployment
//! can bootstrap its first account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::AuthenticatedUser;
use crate::services::user::{CreateUserInput, UpdateUserInput};
use crate::state::AppState;
use crate::Result;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let users = state.users.find_all().await?;
    Ok(Json(json!({ "data": users })))
}

pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.users.find_by_uuid(&uuid).await?;
    Ok(Json(json!({ "data": user })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": user }))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> Result<impl IntoResponse> {
    let user = state.users.update(&uuid, input).await?;
    Ok(Json(json!({ "data": user })))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.users.delete(&uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
