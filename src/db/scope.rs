//! Transaction scope lifecycle
//!
//! A scope owns one transaction for the duration of a logical operation:
//! [`TransactionScope::open`] begins a transaction on the provider's pool
//! and binds it into the scoped session registry; `commit`/`rollback` close
//! the transaction and clear the binding. The binding is cleared on every
//! close path, including commit failure, and the session's connection is
//! released exactly once.

use super::{registry, Database, SharedSession};
use crate::{Error, Result};

#[derive(Debug)]
pub struct TransactionScope {
    session: SharedSession,
}

impl TransactionScope {
    /// Open a scope for the current operation.
    ///
    /// Fails with [`Error::ScopeAlreadyActive`] when the operation already
    /// has a bound session: nested calls are expected to join the existing
    /// scope through the resolver rather than open their own. Fails with
    /// [`Error::SessionAcquire`] when a connection cannot be acquired or the
    /// transaction cannot be started; no binding is created in that case.
    pub async fn open(db: &Database) -> Result<Self> {
        if registry::current_session().is_some() {
            return Err(Error::ScopeAlreadyActive);
        }

        let tx = db.pool().begin().await.map_err(Error::SessionAcquire)?;
        let session = SharedSession::new(tx);
        registry::bind_session(session.clone())?;

        tracing::debug!(session_id = %session.id(), "transaction scope opened");

        Ok(Self { session })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Commit the scope's transaction. The registry binding is cleared
    /// whether or not the commit succeeds, so a failed commit cannot leave a
    /// dangling binding behind.
    pub async fn commit(self) -> Result<()> {
        let result = self.session.commit().await;
        registry::clear_session();

        match &result {
            Ok(()) => {
                tracing::debug!(session_id = %self.session.id(), "transaction scope committed");
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.session.id(),
                    error = %e,
                    "transaction scope commit failed"
                );
            }
        }

        result
    }

    /// Roll back the scope's transaction unconditionally and clear the
    /// registry binding. Safe to call on a session that was already closed.
    pub async fn rollback(self) {
        self.session.rollback().await;
        registry::clear_session();
        tracing::debug!(session_id = %self.session.id(), "transaction scope rolled back");
    }
}
