//! Order API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let floor_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_role(&[
            Role::Waiter,
            Role::Admin,
        ])));

    // Kitchen staff advance individual items, waiters deliver and cancel them
    let item_routes = Router::new()
        .route("/{id}/items/{item_id}/status", put(handler::update_item_status))
        .layer(middleware::from_fn(require_role(&[
            Role::Cook,
            Role::Waiter,
            Role::Admin,
        ])));

    read_routes.merge(floor_routes).merge(item_routes)
}
