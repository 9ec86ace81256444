//! Client handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::AuthenticatedUser;
use crate::services::client::{CreateClientInput, UpdateClientInput};
use crate::state::AppState;
use crate::Result;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let clients = state.clients.find_all().await?;
    Ok(Json(json!({ "data": clients })))
}

pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let client = state.clients.find_by_uuid(&uuid).await?;
    Ok(Json(json!({ "data": client })))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<CreateClientInput>,
) -> Result<impl IntoResponse> {
    let client = state.clients.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": client }))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateClientInput>,
) -> Result<impl IntoResponse> {
    let client = state.clients.update(&uuid, input).await?;
    Ok(Json(json!({ "data": client })))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.clients.delete(&uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
