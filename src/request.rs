//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        parts: http::request::Parts,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/vendors/{id}`, `req.param("id")` on `/vendors/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deserializes the body as exactly one JSON value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Deserializes the body as a sequence of JSON values.
    ///
    /// A body starting with `[` is read as a JSON array. Anything else is read
    /// as zero or more whitespace-separated values, which covers a single
    /// object, newline-delimited JSON and the empty body.
    pub fn json_seq<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        let body = self.body.trim_ascii_start();
        if body.first() == Some(&b'[') {
            return serde_json::from_slice(body);
        }
        serde_json::Deserializer::from_slice(body)
            .into_iter::<T>()
            .collect()
    }
}
