//! # vendors-api
//!
//! A vendor CRUD service on a minimal hyper-based HTTP layer.
//!
//! The HTTP layer is deliberately small:
//!
//! - Radix-tree routing, one tree per method, via [`matchit`]
//! - Async I/O on tokio and hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! On top of it sits one resource, `/api/v1/vendors`, whose handlers delegate
//! to an injected [`VendorStore`]. See [`VendorResource`] for the contract.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vendors_api::{InMemoryVendorStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vendors_api::Error> {
//!     let app = vendors_api::app(Arc::new(InMemoryVendorStore::new()));
//!     Server::bind("0.0.0.0:8080")?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod resource;
mod response;
mod router;
mod server;
mod store;
mod vendor;

pub mod config;
pub mod health;
pub mod logging;
pub mod middleware;

use std::sync::Arc;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use resource::{ApiError, BASE_PATH, VendorResource};
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use store::{InMemoryVendorStore, StoreError, VendorStore, VendorStream};
pub use vendor::Vendor;

/// The full application router: health probes plus the vendor resource.
pub fn app<S: VendorStore>(store: Arc<S>) -> Router {
    let router = Router::new()
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    VendorResource::new(store).routes(router)
}
