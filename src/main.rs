use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use vendors_api::config::Settings;
use vendors_api::{InMemoryVendorStore, Server, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    logging::init(&settings.log);

    info!("starting vendors-api v{}", env!("CARGO_PKG_VERSION"));

    let store = match &settings.seed_file {
        Some(path) => InMemoryVendorStore::from_json_file(path)
            .await
            .with_context(|| format!("failed to seed vendors from {}", path.display()))?,
        None => InMemoryVendorStore::new(),
    };

    let server = Server::bind(&settings.server.addr()).context("invalid server address")?;
    server
        .serve(vendors_api::app(Arc::new(store)))
        .await
        .context("server error")?;

    Ok(())
}
