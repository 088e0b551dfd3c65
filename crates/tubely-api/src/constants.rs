//! API constants
//!
//! Route prefixes and the fixed limits applied to thumbnail uploads.

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path thumbnails are served under; also the path segment of every thumbnail URL.
pub const ASSETS_PATH: &str = "/assets";

/// Multipart field carrying the thumbnail bytes.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Thumbnail bytes held in memory (10 MiB); larger uploads spill to a temporary file.
pub const MAX_THUMBNAIL_MEMORY_BYTES: usize = 10 << 20;

/// Media types accepted for thumbnails.
pub const ALLOWED_THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Random bytes in a generated asset name (43 characters once encoded).
pub const ASSET_NAME_BYTES: usize = 32;

/// Issuer written into and required from every access token.
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Build-time crate version, reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
