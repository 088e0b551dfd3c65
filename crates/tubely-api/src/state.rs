//! Application state and sub-state types.
//!
//! AppState is built once at startup, held in an `Arc` and never mutated.
//! Handlers read the sub-state they need.

use std::path::PathBuf;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoStore;
use tubely_storage::AssetStore;

/// Video record access.
#[derive(Clone)]
pub struct DbState {
    pub videos: Arc<dyn VideoStore>,
}

/// Where thumbnails are written and how their URLs are built.
#[derive(Clone)]
pub struct MediaConfig {
    pub assets: Arc<dyn AssetStore>,
    pub assets_root: PathBuf,
    /// Scheme, host and port prefixed to `/assets/<name>` (no trailing slash).
    pub public_base_url: String,
    pub verify_signature: bool,
}

/// Token validation settings.
#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub media: MediaConfig,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(
        config: &Config,
        videos: Arc<dyn VideoStore>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            db: DbState { videos },
            media: MediaConfig {
                assets,
                assets_root: config.assets_root().to_path_buf(),
                public_base_url: config.public_base_url().to_string(),
                verify_signature: config.verify_thumbnail_signature(),
            },
            security: SecurityConfig {
                jwt_secret: config.jwt_secret().to_string(),
            },
        }
    }
}
