//! Shared domain types for the comanda dining-floor system
//!
//! This crate holds everything both the server and its clients need to agree
//! on: the entity models, the closed status enums with their transition
//! rules, and the request payloads. It deliberately contains no storage or
//! HTTP code.

pub mod models;
pub mod util;

pub use models::{
    CategoryFilter, CreateOrderItem, CreateOrderRequest, DiningTable, LineItem, LineItemStatus,
    LineItemStatusUpdate, Order, OrderStatus, OrderStatusUpdate, Product, Role, Staff, StaffPublic,
    StockAdjustment, TableStatus, TableUpdate,
};
