use crate::traits::{AssetStore, StorageError, StorageResult, StoredAsset};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::AsyncRead;

/// Local filesystem asset store
#[derive(Clone, Debug)]
pub struct LocalAssetStore {
    base_path: PathBuf,
}

impl LocalAssetStore {
    /// Create a new LocalAssetStore, creating the directory if needed
    ///
    /// # Arguments
    /// * `base_path` - Directory assets are written to (e.g., "./assets")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalAssetStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert an asset key to a filesystem path.
    ///
    /// Keys name a file directly inside the base directory; anything that
    /// could address another directory is rejected.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
        }

        if key.contains("..") || key.contains('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<StoredAsset> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let written = async {
            let bytes_copied = tokio::io::copy(&mut reader, &mut file).await?;
            file.sync_all().await?;
            Ok::<u64, std::io::Error>(bytes_copied)
        }
        .await;
        drop(file);

        let size_bytes = match written {
            Ok(size) => size,
            Err(e) => {
                if let Err(cleanup_err) = fs::remove_file(&path).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %path.display(),
                        "Failed to remove partially written asset"
                    );
                }
                return Err(StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            content_type = %content_type,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local asset write successful"
        );

        Ok(StoredAsset {
            key: key.to_string(),
            path,
            size_bytes,
        })
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), key = %key, "Local asset delete successful");

        Ok(())
    }
}
