//! Apply pending database migrations and exit.
//!
//! Reads the same Postgres settings as the server (see
//! [`qna_backend::db::PostgresConfig::from_env`]).

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qna_backend::db::{PostgresConfig, PostgresRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PostgresConfig::from_env();
    info!("migrating {}", config.redacted_url());

    // Connecting runs pending migrations and logs the versions applied.
    PostgresRepository::connect(&config)
        .await
        .context("failed to migrate database")?;

    info!("migrations complete");
    Ok(())
}
