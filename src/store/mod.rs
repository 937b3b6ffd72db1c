//! Persistence port for vendors.
//!
//! [`VendorStore`] is the only seam between the HTTP handlers and storage.
//! Reads that can yield many vendors are lazy streams; everything else is a
//! single awaited value.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use thiserror::Error;

use crate::vendor::Vendor;

mod memory;

pub use memory::InMemoryVendorStore;

/// A lazy stream of vendors produced by a store.
pub type VendorStream<'a> = BoxStream<'a, Result<Vendor, StoreError>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vendor store unavailable: {0}")]
    Unavailable(String),

    #[error("vendor store backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait VendorStore: Send + Sync + 'static {
    /// Every stored vendor, in whatever order the store keeps them.
    fn find_all(&self) -> VendorStream<'_>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, StoreError>;

    /// Inserts `vendor`, or fully replaces the stored vendor with the same id.
    /// A vendor without an id is assigned one. Returns the stored copy.
    async fn save(&self, vendor: Vendor) -> Result<Vendor, StoreError>;

    /// Saves each vendor as it arrives and yields the stored copies in order.
    fn save_all<'a>(&'a self, vendors: BoxStream<'a, Vendor>) -> VendorStream<'a> {
        vendors.then(move |vendor| self.save(vendor)).boxed()
    }
}
