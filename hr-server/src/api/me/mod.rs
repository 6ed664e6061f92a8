//! Self-service API for the signed-in user

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/me", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/profile", get(handler::profile))
        .route("/password", put(handler::change_password))
}
