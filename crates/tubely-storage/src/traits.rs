//! Asset store abstraction trait
//!
//! This module defines the `AssetStore` trait that storage backends implement.

use async_trait::async_trait;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file that was written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Key the asset is addressed by (its file name).
    pub key: String,
    /// Location on disk.
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Asset store abstraction trait
///
/// Handlers write uploaded files through this trait so they do not depend on
/// where the bytes end up.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write everything `reader` yields to a new asset named `key`.
    ///
    /// Fails if an asset with the same key already exists.
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<StoredAsset>;

    /// Delete an asset. Deleting a missing asset is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
