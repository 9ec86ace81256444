//! Database sessions
//!
//! [`SharedSession`] is an open transaction shared by every repository
//! resolved within one operation's scope. [`DbSession`] is the handle
//! repositories execute queries through: either the scoped transaction or
//! the shared pool when no scope is active.

use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{Error, Result};

pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// An open transaction with shared ownership.
///
/// The inner transaction sits behind an `Option` so close paths take it out
/// exactly once: commit, rollback and release cannot happen twice no matter
/// how many handles exist. Dropping the last handle aborts an unclosed
/// transaction and returns its connection to the pool.
#[derive(Clone)]
pub struct SharedSession {
    id: Uuid,
    tx: Arc<Mutex<Option<Transaction<'static, Sqlite>>>>,
}

impl SharedSession {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether two handles refer to the same underlying transaction.
    pub fn same_session(&self, other: &SharedSession) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }

    /// Whether the transaction is still open.
    pub async fn is_open(&self) -> bool {
        self.tx.lock().await.is_some()
    }

    /// Commit the transaction. Fails with [`Error::SessionClosed`] when the
    /// session was already closed.
    pub async fn commit(&self) -> Result<()> {
        let tx = self.tx.lock().await.take().ok_or(Error::SessionClosed)?;
        tx.commit().await.map_err(Error::Commit)
    }

    /// Roll back the transaction. A no-op when the session is already
    /// closed. Rollback failures are logged rather than surfaced so cleanup
    /// paths never mask the outcome they are cleaning up after; the
    /// connection is returned to the pool either way.
    pub async fn rollback(&self) {
        let tx = self.tx.lock().await.take();
        let Some(tx) = tx else {
            return;
        };

        if let Err(e) = tx.rollback().await {
            tracing::warn!(session_id = %self.id, error = %e, "failed to roll back session");
        }
    }

    async fn run_execute(&self, query: SqliteQuery<'_>) -> Result<SqliteQueryResult> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(Error::SessionClosed)?;
        query.execute(&mut **tx).await.map_err(Error::Database)
    }

    async fn run_fetch_one(&self, query: SqliteQuery<'_>) -> Result<SqliteRow> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(Error::SessionClosed)?;
        query.fetch_one(&mut **tx).await.map_err(Error::Database)
    }

    async fn run_fetch_optional(&self, query: SqliteQuery<'_>) -> Result<Option<SqliteRow>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(Error::SessionClosed)?;
        query.fetch_optional(&mut **tx).await.map_err(Error::Database)
    }

    async fn run_fetch_all(&self, query: SqliteQuery<'_>) -> Result<Vec<SqliteRow>> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or(Error::SessionClosed)?;
        query.fetch_all(&mut **tx).await.map_err(Error::Database)
    }
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession").field("id", &self.id).finish()
    }
}

/// The handle a repository executes queries through.
#[derive(Debug, Clone)]
pub enum DbSession {
    /// Unscoped fallback: each statement runs directly against the pool.
    Pool(SqlitePool),
    /// Scoped: every statement runs inside the operation's transaction.
    Scoped(SharedSession),
}

impl DbSession {
    pub fn is_scoped(&self) -> bool {
        matches!(self, DbSession::Scoped(_))
    }

    pub async fn execute(&self, query: SqliteQuery<'_>) -> Result<SqliteQueryResult> {
        match self {
            DbSession::Pool(pool) => query.execute(pool).await.map_err(Error::Database),
            DbSession::Scoped(session) => session.run_execute(query).await,
        }
    }

    pub async fn fetch_one(&self, query: SqliteQuery<'_>) -> Result<SqliteRow> {
        match self {
            DbSession::Pool(pool) => query.fetch_one(pool).await.map_err(Error::Database),
            DbSession::Scoped(session) => session.run_fetch_one(query).await,
        }
    }

    pub async fn fetch_optional(&self, query: SqliteQuery<'_>) -> Result<Option<SqliteRow>> {
        match self {
            DbSession::Pool(pool) => query.fetch_optional(pool).await.map_err(Error::Database),
            DbSession::Scoped(session) => session.run_fetch_optional(query).await,
        }
    }

    pub async fn fetch_all(&self, query: SqliteQuery<'_>) -> Result<Vec<SqliteRow>> {
        match self {
            DbSession::Pool(pool) => query.fetch_all(pool).await.map_err(Error::Database),
            DbSession::Scoped(session) => session.run_fetch_all(query).await,
        }
    }
}
