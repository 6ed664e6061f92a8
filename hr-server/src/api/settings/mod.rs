//! Settings API
//!
//! Mail relay settings of the caller's tenant.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/email", get(handler::get_email).put(handler::update_email))
        .route("/email/test", post(handler::test_email))
        .layer(middleware::from_fn(require_capability(
            Capability::ManageEmailSettings,
        )))
}
