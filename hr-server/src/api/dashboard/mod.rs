//! Dashboard API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::DashboardStats;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard/stats", get(handler::stats))
}
