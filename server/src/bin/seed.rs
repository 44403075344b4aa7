//! Clears and reloads the experience catalog and promo codes.

use std::error::Error;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use bookit_server::config::Config;
use bookit_server::seed;
use bookit_server::store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let experiences = seed::experiences()?;
    let promo_codes = seed::promo_codes()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;
    let store = PgStore::new(pool);

    sqlx::migrate!().run(store.pool()).await?;
    store.replace_catalog(&experiences, &promo_codes).await?;

    tracing::info!(
        experiences = experiences.len(),
        promo_codes = promo_codes.len(),
        "Database seeded successfully"
    );
    Ok(())
}
