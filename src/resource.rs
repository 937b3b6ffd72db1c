//! The `/api/v1/vendors` resource.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/v1/vendors` | `200`, JSON array |
//! | GET | `/api/v1/vendors/{id}` | `200`, vendor or empty body |
//! | POST | `/api/v1/vendors` | `201`, no body |
//! | PUT | `/api/v1/vendors/{id}` | `200`, stored vendor |
//! | PATCH | `/api/v1/vendors/{id}` | `200`, stored or unchanged vendor |

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use http::StatusCode;
use thiserror::Error;
use tracing::{debug, error};

use crate::handler::Handler;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::store::{StoreError, VendorStore, VendorStream};
use crate::vendor::Vendor;

pub const BASE_PATH: &str = "/api/v1/vendors";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("vendor `{0}` not found")]
    NotFound(String),

    #[error("vendor id must not be empty")]
    MissingId,

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingId | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "vendor request failed");
            return Response::status(status);
        }

        Response::builder().status(status).text(self.to_string())
    }
}

/// Vendor handlers over an injected [`VendorStore`].
pub struct VendorResource<S> {
    store: Arc<S>,
}

impl<S: VendorStore> VendorResource<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every stored vendor, in store order.
    pub fn list(&self) -> VendorStream<'_> {
        self.store.find_all()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, ApiError> {
        non_empty(id)?;
        Ok(self.store.find_by_id(id).await?)
    }

    /// Saves every vendor of `vendors` through the bulk path and returns how
    /// many were stored once all of them are.
    pub async fn create<'a>(&'a self, vendors: BoxStream<'a, Vendor>) -> Result<usize, ApiError> {
        let saved = self.store
            .save_all(vendors)
            .try_fold(0usize, |count, _| async move { Ok(count + 1) })
            .await?;
        debug!(saved, "vendors created");
        Ok(saved)
    }

    /// Full replace. The path id wins over any id in `vendor`.
    pub async fn update(&self, id: &str, mut vendor: Vendor) -> Result<Vendor, ApiError> {
        non_empty(id)?;
        vendor.id = Some(id.to_owned());
        Ok(self.store.save(vendor).await?)
    }

    /// Merges the names present in `changes` into the stored vendor.
    ///
    /// The stored vendor is fetched and awaited before any field is looked at.
    /// When `changes` carries no names the fetched vendor is returned as-is
    /// and nothing is written.
    pub async fn patch(&self, id: &str, changes: Vendor) -> Result<Vendor, ApiError> {
        non_empty(id)?;
        let mut vendor = self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(id.to_owned()))?;

        if !vendor.merge(changes) {
            debug!(id, "patch carried no changes, skipping save");
            return Ok(vendor);
        }

        Ok(self.store.save(vendor).await?)
    }

    /// Registers the five vendor routes on `router`.
    pub fn routes(self, router: Router) -> Router {
        let resource = Arc::new(self);
        let item = format!("{BASE_PATH}/{{id}}");

        router
            .get(BASE_PATH, bind(Arc::clone(&resource), list::<S>))
            .post(BASE_PATH, bind(Arc::clone(&resource), create::<S>))
            .get(&item, bind(Arc::clone(&resource), find_by_id::<S>))
            .put(&item, bind(Arc::clone(&resource), update::<S>))
            .patch(&item, bind(Arc::clone(&resource), patch::<S>))
    }
}

fn non_empty(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::MissingId);
    }
    Ok(())
}

/// Turns a handler taking the shared resource into a router [`Handler`].
fn bind<S, F, Fut, R>(resource: Arc<VendorResource<S>>, f: F) -> impl Handler
where
    S: VendorStore,
    F: Fn(Arc<VendorResource<S>>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| f(Arc::clone(&resource), req)
}

// ── HTTP handlers ─────────────────────────────────────────────────────────────

async fn list<S: VendorStore>(
    resource: Arc<VendorResource<S>>,
    _req: Request,
) -> Result<Json<Vec<Vendor>>, ApiError> {
    let vendors = resource.list().try_collect().await?;
    Ok(Json(vendors))
}

async fn find_by_id<S: VendorStore>(
    resource: Arc<VendorResource<S>>,
    req: Request,
) -> Result<Response, ApiError> {
    let id = req.param("id").unwrap_or_default();
    Ok(match resource.find_by_id(id).await? {
        Some(vendor) => Json(vendor).into_response(),
        None => Response::status(StatusCode::OK),
    })
}

/// The server hands over a fully buffered body, so it is parsed up front and
/// a malformed payload is rejected before the first save.
async fn create<S: VendorStore>(
    resource: Arc<VendorResource<S>>,
    req: Request,
) -> Result<StatusCode, ApiError> {
    let vendors: Vec<Vendor> = req.json_seq()?;
    resource.create(stream::iter(vendors).boxed()).await?;
    Ok(StatusCode::CREATED)
}

async fn update<S: VendorStore>(
    resource: Arc<VendorResource<S>>,
    req: Request,
) -> Result<Json<Vendor>, ApiError> {
    let id = req.param("id").unwrap_or_default();
    let vendor = req.json()?;
    Ok(Json(resource.update(id, vendor).await?))
}

async fn patch<S: VendorStore>(
    resource: Arc<VendorResource<S>>,
    req: Request,
) -> Result<Json<Vendor>, ApiError> {
    let id = req.param("id").unwrap_or_default();
    let changes = req.json()?;
    Ok(Json(resource.patch(id, changes).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::store::InMemoryVendorStore;

    fn resource(vendors: Vec<Vendor>) -> VendorResource<InMemoryVendorStore> {
        VendorResource::new(Arc::new(InMemoryVendorStore::with_vendors(vendors)))
    }

    #[tokio::test]
    async fn update_forces_path_id_and_replaces_fully() {
        let resource = resource(vec![Vendor::named("A", "B").with_id("x")]);
        let payload = Vendor { first_name: Some("C".into()), ..Vendor::default() }.with_id("y");

        let saved = resource.update("x", payload).await.unwrap();

        assert_eq!(saved, Vendor { id: Some("x".into()), first_name: Some("C".into()), last_name: None });
        assert_eq!(resource.find_by_id("x").await.unwrap(), Some(saved));
        assert_eq!(resource.find_by_id("y").await.unwrap(), None);
    }

    #[tokio::test]
    async fn patch_of_unknown_vendor_is_not_found() {
        let resource = resource(vec![]);
        let err = resource.patch("ghost", Vendor::named("A", "B")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn empty_id_is_rejected() {
        let resource = resource(vec![]);
        assert!(matches!(resource.find_by_id("").await, Err(ApiError::MissingId)));
        assert!(matches!(resource.update("", Vendor::default()).await, Err(ApiError::MissingId)));
    }

    #[tokio::test]
    async fn create_counts_stored_vendors() {
        let resource = resource(vec![]);
        let input = stream::iter(vec![Vendor::named("A", "B"), Vendor::named("C", "D")]).boxed();
        assert_eq!(resource.create(input).await.unwrap(), 2);

        let all: Vec<Vendor> = resource.list().try_collect().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::MissingId, StatusCode::BAD_REQUEST),
            (ApiError::Store(StoreError::Unavailable("down".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status_code(), status);
        }
    }
}
