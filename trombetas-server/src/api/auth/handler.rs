//! Authentication Handlers
//!
//! Single administrator account guarded by a password

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{ADMIN_ROLE, CurrentUser};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

const ADMIN_ID: &str = "admin";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: CurrentUser,
}

/// Login handler
///
/// Verifies the admin password and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    if !state.admin.is_enabled() {
        return Err(AppError::new(ErrorCode::LoginDisabled));
    }

    // argon2 is CPU bound
    let admin = state.admin.clone();
    let verify = tokio::task::spawn_blocking(move || admin.verify(&req.password));

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let valid = verify
        .await
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !valid {
        security_log!("WARN", "login_failed", reason = "invalid_credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(ADMIN_ID, ADMIN_ID, ADMIN_ROLE)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let claims = state
        .jwt_service
        .validate_token(&token)
        .map_err(|e| AppError::internal(format!("Generated token is invalid: {e}")))?;

    security_log!("INFO", "login_success", user_id = ADMIN_ID);

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: state.jwt_service.get_expiration_seconds(&claims),
        user: CurrentUser::from(claims),
    }))
}

/// Current user handler
pub async fn me(user: CurrentUser) -> ApiResponse<CurrentUser> {
    ApiResponse::success(user)
}
