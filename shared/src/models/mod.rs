//! Domain models
//!
//! Entities and their payload types:
//! - [`Product`] - catalog entry with stock levels
//! - [`DiningTable`] - physical table with occupancy status
//! - [`Order`] / [`LineItem`] - an order and its per-product entries
//! - [`Staff`] - an employee with a [`Role`]
//!
//! All statuses are closed enums with a total `can_transition_to` function;
//! free-form status strings are not accepted anywhere.

pub mod dining_table;
pub mod order;
pub mod product;
pub mod staff;

pub use dining_table::{DiningTable, TableStatus, TableUpdate};
pub use order::{
    CategoryFilter, CreateOrderItem, CreateOrderRequest, LineItem, LineItemStatus,
    LineItemStatusUpdate, Order, OrderStatus, OrderStatusUpdate,
};
pub use product::{Product, StockAdjustment};
pub use staff::{Role, Staff, StaffPublic};
