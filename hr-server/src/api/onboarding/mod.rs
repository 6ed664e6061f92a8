//! Onboarding API
//!
//! Setup wizard for a fresh tenant. Bulk endpoints report per-item results.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/onboarding", routes())
}

fn routes() -> Router<ServerState> {
    let wizard_routes = Router::new()
        .route("/status", get(handler::status))
        .route("/complete", post(handler::complete))
        .route("/skip", post(handler::skip));

    let setup_routes = Router::new()
        .route("/departments", post(handler::departments))
        .route("/leave-types", post(handler::leave_types))
        .route("/employees", post(handler::employees))
        .layer(middleware::from_fn(require_capability(
            Capability::ManageOrganization,
        )));

    wizard_routes.merge(setup_routes)
}
