//! Product handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::AuthenticatedUser;
use crate::services::product::{CreateProductInput, UpdateProductInput};
use crate::state::AppState;
use crate::Result;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let products = state.products.find_all().await?;
    Ok(Json(json!({ "data": products })))
}

pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let product = state.products.find_by_uuid(&uuid).await?;
    Ok(Json(json!({ "data": product })))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": product }))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.products.update(&uuid, input).await?;
    Ok(Json(json!({ "data": product })))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.products.delete(&uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
