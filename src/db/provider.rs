//! Default session provider
//!
//! Owns the process-wide SQLite connection pool and resolves the session for
//! the current operation.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;

use super::{registry, DbSession, Repository};
use crate::config::DatabaseConfig;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(Error::Database)?;

        tracing::info!(path = %config.path, "database pool initialized");

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Resolve the session for the current operation: the scoped session
    /// when one is bound, otherwise the shared pool. Pure beyond the
    /// registry lookup; always reflects the binding at call time.
    pub fn session(&self) -> DbSession {
        match registry::current_session() {
            Some(session) => DbSession::Scoped(session),
            None => DbSession::Pool(self.pool.clone()),
        }
    }

    /// Build a repository over the session resolved for the current
    /// operation.
    pub fn repository<R: Repository>(&self) -> R {
        R::with_session(self.session())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
