//! Sales handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::AuthenticatedUser;
use crate::services::sale::{CreateSaleInput, UpdateSaleInput};
use crate::state::AppState;
use crate::Result;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let sales = state.sales.find_all().await?;
    Ok(Json(json!({ "data": sales })))
}

pub async fn get(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let sale = state.sales.find_by_uuid(&uuid).await?;
    Ok(Json(json!({ "data": sale })))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<CreateSaleInput>,
) -> Result<impl IntoResponse> {
    let sale = state.sales.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": sale }))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateSaleInput>,
) -> Result<impl IntoResponse> {
    let sale = state.sales.update(&uuid, input).await?;
    Ok(Json(json!({ "data": sale })))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(uuid): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.sales.delete(&uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
