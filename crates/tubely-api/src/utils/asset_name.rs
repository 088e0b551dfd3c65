//! Random asset names and the public URLs they are served under.

use crate::constants::{ASSETS_PATH, ASSET_NAME_BYTES};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;
use tubely_core::AppError;

use super::upload::ThumbnailType;

/// Generate `<random>.<ext>` where `<random>` is 32 bytes from the OS RNG,
/// URL-safe base64 encoded without padding.
pub fn generate_asset_filename(kind: ThumbnailType) -> Result<String, AppError> {
    let mut buf = [0u8; ASSET_NAME_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| AppError::Internal(format!("Failed to generate random bytes: {}", e)))?;

    Ok(format!("{}.{}", URL_SAFE_NO_PAD.encode(buf), kind.extension()))
}

/// Public URL of a stored asset.
pub fn asset_url(public_base_url: &str, filename: &str) -> String {
    format!(
        "{}{}/{}",
        public_base_url.trim_end_matches('/'),
        ASSETS_PATH,
        filename
    )
}
