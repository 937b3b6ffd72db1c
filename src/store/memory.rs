use std::path::Path;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{StoreError, VendorStore, VendorStream};
use crate::vendor::Vendor;

/// Insertion-ordered vendor store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryVendorStore {
    vendors: RwLock<Vec<Vendor>>,
}

impl InMemoryVendorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `vendors`, assigning ids where missing.
    pub fn with_vendors(vendors: impl IntoIterator<Item = Vendor>) -> Self {
        let mut stored = Vec::new();
        for vendor in vendors {
            upsert(&mut stored, vendor);
        }
        Self { vendors: RwLock::new(stored) }
    }

    /// Loads a JSON array of vendors from `path`.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        let vendors: Vec<Vendor> =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Backend(Box::new(e)))?;

        info!(path = %path.display(), count = vendors.len(), "seeding vendor store");
        Ok(Self::with_vendors(vendors))
    }

    pub async fn len(&self) -> usize {
        self.vendors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vendors.read().await.is_empty()
    }
}

#[async_trait]
impl VendorStore for InMemoryVendorStore {
    fn find_all(&self) -> VendorStream<'_> {
        // Snapshot on first poll, not on call.
        stream::once(async move { self.vendors.read().await.clone() })
            .flat_map(|vendors| stream::iter(vendors.into_iter().map(Ok)))
            .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, StoreError> {
        let vendors = self.vendors.read().await;
        Ok(vendors.iter().find(|v| v.id.as_deref() == Some(id)).cloned())
    }

    async fn save(&self, vendor: Vendor) -> Result<Vendor, StoreError> {
        let mut vendors = self.vendors.write().await;
        let saved = upsert(&mut vendors, vendor);
        debug!(id = saved.id.as_deref(), "vendor saved");
        Ok(saved)
    }
}

fn upsert(vendors: &mut Vec<Vendor>, mut vendor: Vendor) -> Vendor {
    if vendor.id.as_deref().is_none_or(str::is_empty) {
        vendor.id = Some(Uuid::new_v4().simple().to_string());
    }

    match vendors.iter_mut().find(|v| v.id == vendor.id) {
        Some(slot) => *slot = vendor.clone(),
        None => vendors.push(vendor.clone()),
    }
    vendor
}
