use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;
use crate::services::LookupError;

/// Authenticated identity attached to the request by `authenticate_token`
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user: User,
}

/// Every variant answers 401; only the message differs
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication token is required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Authentication failed")]
    Infrastructure(#[source] LookupError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Bearer token middleware for protected routes.
///
/// On success the request carries an `AuthContext` extension and the next
/// stage runs; on failure the pipeline stops with a 401 JSON body.
pub async fn authenticate_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let resolved = resolve_user(&state, request.headers()).await;
    match resolved {
        Ok(user) => {
            tracing::debug!("Authenticated user {} ({})", user.id, user.user_type);
            request.extensions_mut().insert(AuthContext { user });
            next.run(request).await
        }
        Err(err) => {
            match &err {
                AuthError::Infrastructure(cause) => {
                    tracing::error!("Authentication error: {}", cause);
                }
                other => tracing::warn!("Rejected request: {}", other),
            }
            err.into_response()
        }
    }
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<User, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingToken)?;

    state
        .users
        .user_from_token(token)
        .await
        .map_err(AuthError::Infrastructure)?
        .ok_or(AuthError::InvalidToken)
}

/// Token from `Authorization: Bearer <token>`; scheme matched case-insensitively
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
