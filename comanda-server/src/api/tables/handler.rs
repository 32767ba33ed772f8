//! Dining Table Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{DiningTable, TableUpdate};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Floor plan, ordered by table number
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<DiningTable>>>> {
    let tables = state.floor.list_tables()?;
    Ok(ok(tables))
}

/// Change a table's status, staff assignment, or both
pub async fn update(
    State(state): State<ServerState>,
    Path(number): Path<u32>,
    Json(update): Json<TableUpdate>,
) -> AppResult<Json<AppResponse<DiningTable>>> {
    let table = state.floor.update_table(number, update)?;
    Ok(ok(table))
}
