//! Shared server utilities

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, ok, ok_with_message};

/// Handler result alias
pub type AppResult<T> = Result<T, AppError>;
