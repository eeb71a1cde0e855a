use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, AuthContext};

/// GET /api/auth/whoami - the user resolved from the bearer token
pub async fn whoami_get(Extension(ctx): Extension<AuthContext>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "user": ctx.user }))
}
