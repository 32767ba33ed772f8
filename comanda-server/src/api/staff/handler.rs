//! Staff Handlers

use axum::{Json, extract::State};
use shared::StaffPublic;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Staff accounts, credentials stripped
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<StaffPublic>>>> {
    let staff = state.floor.list_staff()?;
    Ok(ok(staff))
}
