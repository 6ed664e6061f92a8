//! Attendance API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Capability, require_capability};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    let own_routes = Router::new()
        .route("/", get(handler::list))
        .route("/today", get(handler::today))
        .route("/clock-in", post(handler::clock_in))
        .route("/clock-out", post(handler::clock_out));

    let mark_routes = Router::new()
        .route("/", post(handler::mark))
        .layer(middleware::from_fn(require_capability(
            Capability::MarkAttendance,
        )));

    own_routes.merge(mark_routes)
}
