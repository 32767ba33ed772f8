//! Engine error taxonomy

use thiserror::Error;

use crate::floor::storage::StorageError;

/// Everything that can go wrong on the floor
///
/// Validation and state-machine violations abort the surrounding write
/// transaction; nothing is partially applied.
#[derive(Debug, Error)]
pub enum FloorError {
    #[error("Product {0} not found")]
    ProductNotFound(u64),

    #[error("Table {0} not found")]
    TableNotFound(u32),

    #[error("Order {0} not found")]
    OrderNotFound(u64),

    #[error("Item {item_id} not found in order {order_id}")]
    LineItemNotFound { order_id: u64, item_id: u64 },

    #[error(
        "Insufficient stock for {product_name}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: u64,
        product_name: String,
        requested: i32,
        available: i32,
    },

    #[error("Invalid {entity} transition: {from} -> {to}")]
    InvalidTransition {
        entity: &'static str,
        from: &'static str,
        to: &'static str,
    },

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: u64, quantity: i32 },

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Table {0} still has open orders")]
    TableHasOpenOrders(u32),

    #[error("Order {0} is settled")]
    OrderSettled(u64),

    #[error("Seeding failed: {0}")]
    Seed(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
