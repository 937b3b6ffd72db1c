//! Middleware layer.
//!
//! Cross-cutting request concerns live here. Today that is request tracing:
//! every routed request runs inside a span carrying its method and path, and
//! its completion is logged with status and latency.

mod trace;

pub use trace::trace;
