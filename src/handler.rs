//! Handler trait and type erasure.
//!
//! The router stores handlers of different concrete types in one
//! `HashMap<Method, Tree>`, so each handler is hidden behind
//! `dyn ErasedHandler`:
//!
//! ```text
//! async fn liveness(req: Request) -> Response { … }   ← plain async fn
//! move |req| list(Arc::clone(&resource), req)        ← or a closure over state
//!        ↓ router.get("/healthz", liveness)
//! handler.into_boxed_handler()                        ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(handler))                        ← stored as BoxedHandler
//!        ↓
//! handler.call(req) at request time                   ← one vtable dispatch
//!        ↓
//! Box::pin(async { fut.await.into_response() })       ← BoxFuture
//! ```
//!
//! Per request this costs one `Arc` clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `Fn(Request) -> impl Future<Output = impl
/// IntoResponse>` that is `Send + Sync + 'static`. There is no extractor or
/// state parameter: a handler that needs shared state is a closure owning an
/// `Arc` of it, cloning the `Arc` into each request's future.
///
/// ```rust
/// use std::sync::Arc;
///
/// use vendors_api::{InMemoryVendorStore, Request, Router, VendorStore};
///
/// let store = Arc::new(InMemoryVendorStore::new());
/// let router = Router::new().get("/count", move |_req: Request| {
///     let store = Arc::clone(&store);
///     async move {
///         let found = store.find_by_id("42").await.is_ok_and(|v| v.is_some());
///         if found { "1" } else { "0" }
///     }
/// });
/// # drop(router);
/// ```
///
/// The trait is sealed; only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Bridges a concrete handler `F` into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
