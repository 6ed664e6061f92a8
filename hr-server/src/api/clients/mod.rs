//! Client API
//!
//! Reads are open to the tenant; writes need `ManageBilling`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clients", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_capability(Capability::ManageBilling)));

    read_routes.merge(manage_routes)
}
