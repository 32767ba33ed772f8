//! Dining Table API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/{number}", put(handler::update))
        .layer(middleware::from_fn(require_role(&[
            Role::Waiter,
            Role::Admin,
        ])));

    read_routes.merge(manage_routes)
}
