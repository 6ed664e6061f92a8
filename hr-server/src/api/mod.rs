//! API routes
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness (public)
//! - [`auth`] - register, login, password reset
//! - [`me`] - the caller's profile and password
//! - [`tenants`], [`departments`], [`employees`] - organization directory
//! - [`leave_types`], [`leave_requests`] - leave
//! - [`attendance`] - clock-in/out and day records
//! - [`dashboard`] - tenant statistics
//! - [`onboarding`] - bulk setup wizard
//! - [`settings`] - mail relay settings
//! - [`clients`], [`projects`], [`tasks`], [`timesheets`] - time and billing

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::middleware::logging_middleware;

pub mod health;

pub mod auth;
pub mod me;

pub mod departments;
pub mod employees;
pub mod tenants;

pub mod attendance;
pub mod leave_requests;
pub mod leave_types;

pub mod dashboard;
pub mod onboarding;
pub mod settings;

pub mod clients;
pub mod projects;
pub mod tasks;
pub mod timesheets;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(me::router())
        .merge(tenants::router())
        .merge(departments::router())
        .merge(employees::router())
        .merge(leave_types::router())
        .merge(leave_requests::router())
        .merge(attendance::router())
        .merge(dashboard::router())
        .merge(onboarding::router())
        .merge(settings::router())
        .merge(clients::router())
        .merge(projects::router())
        .merge(tasks::router())
        .merge(timesheets::router())
}

/// Routes plus the full middleware stack; used by the server and by tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Outermost: resolves the caller before anything else runs
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
}
