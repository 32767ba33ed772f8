//! Product API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/categories", get(handler::categories));

    let stock_routes = Router::new()
        .route("/{id}/stock", put(handler::adjust_stock))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(stock_routes)
}
