//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::StaffPublic;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub staff: StaffPublic,
}

/// Login handler
///
/// Authenticates staff credentials and returns a JWT token. Failures share
/// one message to prevent username enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let staff = state.floor.find_staff_by_username(&req.username)?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let staff = match staff {
        Some(s) => s,
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !staff.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let password_valid = crate::auth::verify_password(&req.password, &staff.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(staff.id, &staff.username, staff.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        staff_id = staff.id,
        username = %staff.username,
        role = %staff.role.as_str(),
        "User logged in successfully"
    );

    Ok(ok(LoginResponse {
        token,
        staff: staff.to_public(),
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<StaffPublic>>> {
    let staff = state
        .floor
        .find_staff_by_username(&user.username)?
        .ok_or_else(|| AppError::not_found(format!("Staff {}", user.username)))?;
    Ok(ok(staff.to_public()))
}
