//! Scoped session registry
//!
//! Associates at most one database session with the current logical
//! operation (one HTTP request or one test body, including every nested call
//! it makes). The association key is the task-local context established by
//! [`with_session_context`], which travels with the operation's future
//! rather than the worker thread: concurrent operations multiplexed over a
//! shared worker pool never observe each other's bindings, and a binding
//! survives suspension and resumption within its own operation.

use std::cell::RefCell;
use std::future::Future;

use super::SharedSession;
use crate::{Error, Result};

tokio::task_local! {
    static ACTIVE_SESSION: RefCell<Option<SharedSession>>;
}

/// Run `fut` inside a fresh, empty session context. The cell is destroyed
/// when `fut` completes, so a binding can never leak into an unrelated later
/// operation scheduled onto the same worker. Nested contexts shadow the
/// outer one and restore it on exit.
pub async fn with_session_context<F: Future>(fut: F) -> F::Output {
    ACTIVE_SESSION.scope(RefCell::new(None), fut).await
}

/// Whether a session context is established for the current operation.
pub fn in_session_context() -> bool {
    ACTIVE_SESSION.try_with(|_| ()).is_ok()
}

/// Associate `session` with the current operation, replacing any existing
/// binding. Fails when no session context is established.
pub fn bind_session(session: SharedSession) -> Result<()> {
    ACTIVE_SESSION
        .try_with(|cell| {
            cell.borrow_mut().replace(session);
        })
        .map_err(|_| Error::NoSessionContext)
}

/// The session bound to the current operation, if any. Never blocks.
pub fn current_session() -> Option<SharedSession> {
    ACTIVE_SESSION
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
}

/// Remove the current operation's binding. Idempotent: clearing an already
/// cleared context, or calling outside any context, is a no-op.
pub fn clear_session() {
    let _ = ACTIVE_SESSION.try_with(|cell| {
        cell.borrow_mut().take();
    });
}
