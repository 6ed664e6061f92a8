use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (after `.env` is loaded):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8001 | HTTP listen port |
/// | DATABASE_PATH | ./data/hrms.db | RocksDB directory (`memory` for in-memory) |
/// | DB_NAMESPACE | hrms | SurrealDB namespace |
/// | DB_NAME | main | SurrealDB database |
/// | ENVIRONMENT | development | development / staging / production |
/// | FRONTEND_URL | http://localhost:3000 | Base URL used in email links |
/// | SEED_ADMIN_EMAIL | admin@hrms.local | Bootstrap super admin |
/// | SEED_ADMIN_PASSWORD | (random) | Bootstrap super admin password |
/// | OUTBOX_POLL_SECS | 30 | Email outbox polling interval |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown budget |
/// | LOG_LEVEL / LOG_DIR / LOG_JSON | info / - / false | Logging |
///
/// JWT settings are read by [`JwtConfig::default`].
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=memory cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Database location; `memory` selects the in-memory engine
    pub database_path: String,
    pub db_namespace: String,
    pub db_name: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// SPA base URL, used to build links in emails
    pub frontend_url: String,
    pub seed_admin_email: String,
    pub seed_admin_password: Option<String>,
    /// Outbox worker tick (seconds)
    pub outbox_poll_secs: u64,
    /// Graceful shutdown timeout (milliseconds)
    pub shutdown_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 8001),
            database_path: env_or("DATABASE_PATH", "./data/hrms.db"),
            db_namespace: env_or("DB_NAMESPACE", "hrms"),
            db_name: env_or("DB_NAME", "main"),
            jwt: JwtConfig::default(),
            environment: env_or("ENVIRONMENT", "development"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            seed_admin_email: env_or("SEED_ADMIN_EMAIL", "admin@hrms.local"),
            seed_admin_password: std::env::var("SEED_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            outbox_poll_secs: env_parse("OUTBOX_POLL_SECS", 30),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            log_json: env_parse("LOG_JSON", false),
        }
    }

    /// In-memory configuration for tests
    ///
    /// Does not touch the environment apart from the JWT defaults.
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_path: "memory".into(),
            db_namespace: "test".into(),
            db_name: "test".into(),
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-long-enough-for-hs256".into(),
                expiration_minutes: 480,
                issuer: "hr-server".into(),
                audience: "hr-clients".into(),
            },
            environment: "test".into(),
            frontend_url: "http://localhost:3000".into(),
            seed_admin_email: "admin@hrms.local".into(),
            seed_admin_password: Some("admin-password".into()),
            outbox_poll_secs: 30,
            shutdown_timeout_ms: 1000,
            log_level: "warn".into(),
            log_dir: None,
            log_json: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == "memory"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
