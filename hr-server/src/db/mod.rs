//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, or the in-memory engine for tests
//! and `DATABASE_PATH=memory`.

pub mod id;
pub mod models;
pub mod repository;
pub mod schema;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::Config;
use crate::utils::AppError;

/// Database service - owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database, select namespace/database and apply the schema
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = if config.is_in_memory() {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?
        } else {
            if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!("Failed to create database directory: {e}"))
                })?;
            }
            Surreal::new::<RocksDb>(config.database_path.as_str())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        db.use_ns(config.db_namespace.as_str())
            .use_db(config.db_name.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(
            path = %config.database_path,
            namespace = %config.db_namespace,
            database = %config.db_name,
            "Database connection established"
        );

        db.query(schema::SCHEMA)
            .await
            .and_then(|res| res.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
