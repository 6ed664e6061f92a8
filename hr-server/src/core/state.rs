use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Notify;

use crate::auth::JwtService;
use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db::DbService;
use crate::services::mailer::{Mailer, SmtpMailer};
use crate::services::outbox::OutboxWorker;
use crate::services::seed;
use crate::utils::AppResult;

/// Shared server state
///
/// Cheap to clone: every heavy member sits behind an `Arc` or is a handle.
/// Built once in `main` and handed to every handler through axum state.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | Embedded SurrealDB handle |
/// | jwt_service | Token issuing and validation |
/// | mailer | Outgoing mail transport |
/// | outbox_notify | Wakes the outbox worker after a row is queued |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub mailer: Arc<dyn Mailer>,
    pub outbox_notify: Arc<Notify>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Initialize with the SMTP mailer
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        Self::initialize_with_mailer(config, Arc::new(SmtpMailer)).await
    }

    /// Initialize with a caller-supplied mailer
    ///
    /// 1. Open the database and apply the schema
    /// 2. Build the JWT service
    /// 3. Seed the bootstrap super admin
    pub async fn initialize_with_mailer(
        config: &Config,
        mailer: Arc<dyn Mailer>,
    ) -> AppResult<Self> {
        let db_service = DbService::new(config).await?;

        let state = Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            mailer,
            outbox_notify: Arc::new(Notify::new()),
        };

        seed::ensure_super_admin(&state).await?;

        Ok(state)
    }

    /// Spawn the long-running workers
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let worker = OutboxWorker::new(self.clone(), tasks.shutdown_token());
        tasks.spawn("email_outbox", TaskKind::Worker, worker.run());
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Wake the outbox worker
    pub fn notify_outbox(&self) {
        self.outbox_notify.notify_one();
    }
}
