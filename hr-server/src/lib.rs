//! HR server - multi-tenant HRMS backend
//!
//! # Layout
//!
//! ```text
//! hr-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT, password hashing, role policy, auth middleware
//! ├── api/           # HTTP routes and handlers, one module per resource
//! ├── db/            # embedded SurrealDB, models, repositories
//! ├── services/      # mail, outbox, onboarding, timesheet arithmetic
//! ├── middleware/    # request logging
//! └── utils/         # errors, logger, dates, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event on the `security` tracing target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging from the environment's config
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
  _   _ ____
 | | | |  _ \   ___  ___ _ ____   _____ _ __
 | |_| | |_) | / __|/ _ \ '__\ \ / / _ \ '__|
 |  _  |  _ <  \__ \  __/ |   \ V /  __/ |
 |_| |_|_| \_\ |___/\___|_|    \_/ \___|_|
    "#
    );
}
