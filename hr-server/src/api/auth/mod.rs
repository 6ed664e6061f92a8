//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register | POST | public |
//! | /api/auth/login | POST | public |
//! | /api/auth/me | GET | token |
//! | /api/auth/password-reset/request | POST | public |
//! | /api/auth/password-reset/confirm | POST | public |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
        .route("/password-reset/request", post(handler::request_password_reset))
        .route("/password-reset/confirm", post(handler::confirm_password_reset))
}
