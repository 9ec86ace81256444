//! Per-request transaction scope
//!
//! Wraps each API request in a transaction scope: downstream services
//! resolve repositories bound to the request's session, the transaction
//! commits when the handler produced a success response and rolls back
//! otherwise. In all cases the session binding is cleared before the
//! response leaves the middleware.
//!
//! A request that already runs inside an ambient scope joins it untouched
//! instead of opening its own; the test harness relies on this to route
//! in-process requests through the test's rolled-back session.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::db::{registry, TransactionScope};
use crate::state::AppState;

pub async fn transaction_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if registry::current_session().is_some() {
        return next.run(req).await;
    }

    registry::with_session_context(async move {
        let scope = match TransactionScope::open(&state.db).await {
            Ok(scope) => scope,
            Err(e) => return e.into_response(),
        };

        let response = next.run(req).await;

        if response.status().is_client_error() || response.status().is_server_error() {
            scope.rollback().await;
            return response;
        }

        match scope.commit().await {
            Ok(()) => response,
            Err(e) => e.into_response(),
        }
    })
    .await
}
