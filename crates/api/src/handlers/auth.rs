use axum::extract::State;
use axum::Json;
use linkout_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::issue_token;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/admin/login -- exchange the admin credential for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let admin = &state.config.admin;
    if payload.username != admin.username || payload.password != admin.password {
        return Err(CoreError::Unauthorized("Invalid credentials".into()).into());
    }
    tracing::info!("Admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        token: issue_token(admin),
    }))
}
