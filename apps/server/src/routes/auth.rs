//! Login endpoint and authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, LoginResponse};
use crate::AppState;

/// Authenticated user stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let token = state.access.login(&payload.user_id, &payload.password)?;
    Ok(Json(LoginResponse { token }))
}

/// Auth middleware - resolves the bearer token to a user
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    let user = state.access.resolve(token).ok_or_else(|| {
        ApiError::Unauthorized("Log in with the access password first".to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.user_id,
    });

    Ok(next.run(request).await)
}
