//! Asset storage setup

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{AssetStore, LocalAssetStore};

/// Create the assets directory if needed and return the store writing into it.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn AssetStore>> {
    let store = LocalAssetStore::new(config.assets_root())
        .await
        .context("Failed to initialize asset storage")?;

    tracing::info!(
        assets_root = %store.base_path().display(),
        "Asset storage initialized"
    );

    Ok(Arc::new(store))
}
