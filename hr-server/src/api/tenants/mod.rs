//! Tenant API (platform administrators only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tenants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .layer(middleware::from_fn(require_capability(Capability::ManageTenants)))
}
