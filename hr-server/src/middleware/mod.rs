//! HTTP middleware that is not about authentication

pub mod logging;

pub use logging::logging_middleware;
