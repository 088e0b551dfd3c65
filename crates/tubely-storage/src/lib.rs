//! Tubely Storage Library
//!
//! This crate provides the asset store abstraction and its local filesystem
//! implementation.
//!
//! # Key format
//!
//! Assets live flat in a single directory, so a key is just a file name
//! (`{token}.{ext}`). Keys must not be empty and must not contain `..`, `/`
//! or `\`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalAssetStore;
pub use traits::{AssetStore, StorageError, StorageResult, StoredAsset};
