//! Category handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::AuthenticatedUser;
use crate::services::category::{CreateCategoryInput, UpdateCategoryInput};
use crate::state::AppState;
use crate::Result;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let categories = state.categories.find_all().await?;
    Ok(Json(json!({ "data": categories })))
}

pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let category = state.categories.find_by_uuid(&uuid).await?;
    Ok(Json(json!({ "data": category })))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<CreateCategoryInput>,
) -> Result<impl IntoResponse> {
    let category = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": category }))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<impl IntoResponse> {
    let category = state.categories.update(&uuid, input).await?;
    Ok(Json(json!({ "data": category })))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.categories.delete(&uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
