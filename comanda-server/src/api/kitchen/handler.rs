//! Kitchen Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::CategoryFilter;
use shared::util::now_millis;

use crate::core::ServerState;
use crate::kitchen::{self, PendingTicket};
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    #[serde(default)]
    pub filter: CategoryFilter,
}

#[derive(Debug, Serialize)]
pub struct PendingResponse {
    /// Suggested client polling interval
    pub refresh_secs: u64,
    pub tickets: Vec<PendingTicket>,
}

/// Pending-ticket queue for the kitchen display, `?filter=food|drink|all`
///
/// Projected from one consistent storage snapshot: an order settling during
/// the read can never show up half-applied.
pub async fn pending(
    State(state): State<ServerState>,
    Query(query): Query<PendingQuery>,
) -> AppResult<Json<AppResponse<PendingResponse>>> {
    let (orders, staff_names) = state.floor.open_orders_with_staff()?;
    let tickets = kitchen::build(
        orders,
        &staff_names,
        &state.config.food_category,
        query.filter,
        now_millis(),
    );
    Ok(ok(PendingResponse {
        refresh_secs: state.config.kitchen_refresh_secs,
        tickets,
    }))
}
