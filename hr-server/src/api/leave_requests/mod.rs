//! Leave Request API
//!
//! Anyone may file and list requests; deciding needs `DecideLeave`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/leave-requests", routes())
}

fn routes() -> Router<ServerState> {
    let own_routes = Router::new().route("/", get(handler::list).post(handler::create));

    let decide_routes = Router::new()
        .route("/{id}/approve", put(handler::approve))
        .route("/{id}/reject", put(handler::reject))
        .layer(middleware::from_fn(require_capability(Capability::DecideLeave)));

    own_routes.merge(decide_routes)
}
