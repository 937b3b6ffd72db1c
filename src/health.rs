//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can the service take traffic? |
//!
//! Both are registered by [`app`](crate::app).

use crate::{Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe. `200 OK` with body `"ready"` once the router is serving.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
