//! Test double for [`VendorStore`] that records what the handlers asked of it.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use http::Method;

use vendors_api::{InMemoryVendorStore, StoreError, Vendor, VendorStore, VendorStream};

/// Wraps an [`InMemoryVendorStore`] and records every write.
///
/// `save` and `save_all` are recorded separately: items written through the
/// bulk path do not show up in [`RecordingStore::saved`].
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryVendorStore,
    saved: Mutex<Vec<Vendor>>,
    bulk_saved: Mutex<Vec<Vendor>>,
    fail: bool,
}

impl RecordingStore {
    pub fn with_vendors(vendors: impl IntoIterator<Item = Vendor>) -> Self {
        Self { inner: InMemoryVendorStore::with_vendors(vendors), ..Self::default() }
    }

    /// A store whose every operation fails.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// Arguments of every `save` call, in call order.
    pub fn saved(&self) -> Vec<Vendor> {
        self.saved.lock().unwrap().clone()
    }

    /// Items pulled through `save_all`, in arrival order.
    pub fn bulk_saved(&self) -> Vec<Vendor> {
        self.bulk_saved.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VendorStore for RecordingStore {
    fn find_all(&self) -> VendorStream<'_> {
        if let Err(e) = self.check() {
            return stream::once(async move { Err(e) }).boxed();
        }
        self.inner.find_all()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, StoreError> {
        self.check()?;
        self.inner.find_by_id(id).await
    }

    async fn save(&self, vendor: Vendor) -> Result<Vendor, StoreError> {
        self.saved.lock().unwrap().push(vendor.clone());
        self.check()?;
        self.inner.save(vendor).await
    }

    fn save_all<'a>(&'a self, vendors: BoxStream<'a, Vendor>) -> VendorStream<'a> {
        vendors
            .then(move |vendor| async move {
                self.bulk_saved.lock().unwrap().push(vendor.clone());
                self.check()?;
                self.inner.save(vendor).await
            })
            .boxed()
    }
}

pub fn request(method: Method, uri: &str, body: &str) -> http::Request<Bytes> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Bytes::copy_from_slice(body.as_bytes()))
        .unwrap()
}
