use std::future::Future;
use std::time::Instant;

use http::Method;
use tracing::{Instrument, info, info_span, warn};

use crate::response::Response;

/// Runs `routed` inside a `request` span and logs how it finished.
///
/// Server errors log at `warn`, everything else at `info`.
pub async fn trace<F>(method: Method, path: String, routed: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    let started = Instant::now();

    let response = routed.instrument(span.clone()).await;

    let status = response.status_code().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    span.in_scope(|| {
        if response.status_code().is_server_error() {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
    });

    response
}
