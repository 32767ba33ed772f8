//! Inventory Handlers

use axum::{Json, extract::State};
use shared::Product;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Products at or below their alert threshold, most critical first
pub async fn alerts(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let alerts = state.floor.low_stock_alerts()?;
    Ok(ok(alerts))
}
