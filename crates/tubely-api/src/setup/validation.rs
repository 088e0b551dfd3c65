//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tubely_core::Config;

/// Validate critical configuration values
///
/// Runs the checks in `Config::validate` and adds the ones that only matter
/// to a running server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.jwt_secret().trim().is_empty() {
        return Err(anyhow::anyhow!("JWT_SECRET cannot be empty"));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.verify_thumbnail_signature() {
        tracing::info!("Thumbnail signature verification enabled");
    }

    Ok(())
}
