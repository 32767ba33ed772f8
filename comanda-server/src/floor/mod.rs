//! The dining-floor engine
//!
//! Owns the embedded store and implements every order, table and stock
//! operation. All state changes that must hold together (stock reservation,
//! order persistence, table occupancy) commit in one write transaction;
//! the store admits a single writer so reservations serialize and stock can
//! never be oversold.

pub mod error;
pub mod seed;
pub mod service;
pub mod storage;

pub use error::FloorError;
pub use service::FloorService;
pub use storage::{FloorStorage, StorageError};

pub type FloorResult<T> = Result<T, FloorError>;
