//! Timesheet API
//!
//! Entries belong to their author. Weekly approval needs `DecideTimesheets`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/timesheets", routes())
}

fn routes() -> Router<ServerState> {
    let own_routes = Router::new()
        .route("/entries", get(handler::list_entries).post(handler::create_entry))
        .route(
            "/entries/{id}",
            put(handler::update_entry).delete(handler::delete_entry),
        )
        .route("/submit", post(handler::submit))
        .route("/summary", get(handler::summary));

    let approval_routes = Router::new()
        .route("/approve", post(handler::approve))
        .route("/reject", post(handler::reject))
        .route("/pending", get(handler::pending))
        .layer(middleware::from_fn(require_capability(
            Capability::DecideTimesheets,
        )));

    own_routes.merge(approval_routes)
}
