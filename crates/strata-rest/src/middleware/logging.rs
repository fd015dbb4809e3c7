//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Logs one line per request. Server errors are logged at warn level so they
/// stand out from routine traffic.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(target: "http", %method, %uri, status, duration_ms, "HTTP request failed");
    } else {
        info!(target: "http", %method, %uri, status, duration_ms, "HTTP request completed");
    }

    response
}
