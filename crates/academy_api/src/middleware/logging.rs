//! Request logging middleware

use crate::error::ErrorDetails;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::{Duration, Instant};

const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(500);

/// Logs one `http_request` line per request and stamps error bodies with the
/// request path.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let mut response = next.run(request).await;
    if let Some(details) = response.extensions_mut().remove::<ErrorDetails>() {
        response = details.into_response_for(&path);
    }

    let elapsed = started_at.elapsed();
    let status = response.status();
    if status.is_server_error() {
        warn!(
            "event=http_request module=api status=error method={} path={} http_status={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            elapsed.as_millis()
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={} path={} http_status={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            elapsed.as_millis()
        );
    }
    if elapsed > SLOW_REQUEST_THRESHOLD {
        warn!(
            "event=http_request_slow module=api status=slow method={} path={} duration_ms={}",
            method,
            path,
            elapsed.as_millis()
        );
    }

    response
}
