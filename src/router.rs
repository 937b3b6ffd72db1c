//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to
/// [`Server::serve`](crate::Server::serve). Each registration returns `self`
/// so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PATCH, path, handler)
    }

    /// Routes one buffered request and produces its response.
    ///
    /// One trailing `/` is ignored, so `/vendors/` routes like `/vendors`.
    /// Unknown paths answer `404`. A path registered under other methods
    /// answers `405` with an `Allow` header.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let method = parts.method.clone();
        let path = parts.uri.path().to_owned();
        let route = route_path(&path).to_owned();

        let routed = async move {
            match self.lookup(&parts.method, &route) {
                Some((handler, params)) => handler.call(Request::new(parts, body, params)).await,
                None => self.unmatched(&parts.method, &route),
            }
        };

        middleware::trace(method, path, routed).await
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    fn unmatched(&self, method: &Method, path: &str) -> Response {
        let mut allowed: Vec<&str> = self.routes.iter()
            .filter(|(m, tree)| *m != method && tree.at(path).is_ok())
            .map(|(m, _)| m.as_str())
            .collect();

        if allowed.is_empty() {
            return Response::status(StatusCode::NOT_FOUND);
        }

        allowed.sort_unstable();
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("allow", &allowed.join(", "))
            .no_body()
    }
}

/// Drops one trailing `/`, leaving the root path alone.
fn route_path(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    async fn created(_req: Request) -> StatusCode {
        StatusCode::CREATED
    }

    fn request(method: Method, uri: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    fn router() -> Router {
        Router::new()
            .get("/things/{id}", echo_id)
            .put("/things/{id}", echo_id)
            .post("/things", created)
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let res = router().handle(request(Method::GET, "/things/abc")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"abc");
    }

    #[tokio::test]
    async fn dispatches_by_method() {
        let res = router().handle(request(Method::POST, "/things")).await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let res = router().handle(request(Method::GET, "/nothing")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_lists_allowed_ones() {
        let res = router().handle(request(Method::DELETE, "/things/abc")).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("GET, PUT"));
    }

    #[tokio::test]
    async fn trailing_slash_routes_like_bare_path() {
        let created = router().handle(request(Method::POST, "/things/")).await;
        assert_eq!(created.status_code(), StatusCode::CREATED);

        let echoed = router().handle(request(Method::GET, "/things/abc/")).await;
        assert_eq!(echoed.body(), b"abc");
    }

    #[test]
    fn route_path_keeps_root() {
        assert_eq!(route_path("/"), "/");
        assert_eq!(route_path("/things/"), "/things");
        assert_eq!(route_path("/things"), "/things");
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new()
            .post("/things", created)
            .post("/things", created);
    }
}
