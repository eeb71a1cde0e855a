use axum::extract::{Path, State};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /user/api/users/:id - profile lookup used by the coach feedback dialog
pub async fn user_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid user id"))?;

    match state.users.find_user(id).await? {
        Some(user) => Ok(ApiResponse::success(json!({ "user": user }))),
        None => Err(ApiError::not_found("User not found")),
    }
}
