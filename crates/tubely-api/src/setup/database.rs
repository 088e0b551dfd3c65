//! Postgres pool and schema migrations

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tubely_core::Config;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const APPLICATION_NAME: &str = "tubely-api";

/// Connect to the videos database and bring its schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = connect(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}

fn connect_options(config: &Config) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(config.database_url())
        .context("DATABASE_URL is not a valid Postgres connection string")?
        .application_name(APPLICATION_NAME);
    Ok(options)
}

async fn connect(config: &Config) -> Result<PgPool> {
    let options = connect_options(config)?;
    tracing::info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or_default(),
        "Connecting to video database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .connect_with(options)
        .await
        .context("Failed to connect to video database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Video database pool ready"
    );
    Ok(pool)
}

async fn migrate(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to apply videos schema migrations")?;
    tracing::info!(
        migrations = MIGRATOR.iter().count(),
        "Videos schema up to date"
    );
    Ok(())
}
