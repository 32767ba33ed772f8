//! Product Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{Product, StockAdjustment};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Catalog, grouped by category then name
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = state.floor.list_products()?;
    Ok(ok(products))
}

/// Distinct category names
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<String>>>> {
    let categories = state.floor.product_categories()?;
    Ok(ok(categories))
}

/// Manual stock correction (restock or shrinkage)
pub async fn adjust_stock(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(adj): Json<StockAdjustment>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.floor.adjust_stock(id, adj)?;
    Ok(ok(product))
}
