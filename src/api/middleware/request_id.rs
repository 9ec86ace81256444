//! Request ID middleware

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Assigns each request a server-side ID, makes it available to inner
/// middleware and handlers, and echoes it in the `x-request-id` response
/// header.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let server_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(RequestContext {
        request_id: server_id.clone(),
    });

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    tracing::debug!(
        method = %method,
        path = %path,
        request_id = %server_id,
        "incoming request"
    );

    let mut response = next.run(req).await;

    let status = response.status();
    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %server_id,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&server_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
