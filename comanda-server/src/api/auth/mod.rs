//! Auth API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::{LoginRequest, LoginResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // public, skipped by the auth middleware
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
