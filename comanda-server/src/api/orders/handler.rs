//! Order Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{CreateOrderRequest, LineItemStatusUpdate, Order, OrderStatus, OrderStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// Create an order
///
/// Stock reservation, price snapshot and table occupancy happen atomically;
/// the creating staff member becomes the table's assignee.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.floor.create_order(user.id, req)?;
    Ok(ok_with_message(order, "Order created"))
}

/// List orders, newest first, optionally filtered by `?status=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let orders = state.floor.list_orders(query.status)?;
    Ok(ok(orders))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.floor.get_order(id)?;
    Ok(ok(order))
}

/// Move an order through its state machine
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(update): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.floor.update_order_status(id, update)?;
    Ok(ok(order))
}

/// Move one line item through the preparation pipeline
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(u64, u64)>,
    Json(update): Json<LineItemStatusUpdate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.floor.update_line_item_status(id, item_id, update.status)?;
    Ok(ok(order))
}
