//! Authentication handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::services::auth::LoginInput;
use crate::state::AppState;
use crate::Result;

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let response = state.auth.login(input).await?;
    Ok(Json(json!({ "data": response })))
}
