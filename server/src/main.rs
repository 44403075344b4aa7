use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bookit_server::config::{Config, StoreBackend};
use bookit_server::routes::create_routes;
use bookit_server::state::AppState;
use bookit_server::store::{MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookit_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = match config.store {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;

            tracing::info!("Successfully connected to database");

            sqlx::migrate!().run(&pool).await?;

            tracing::info!("Migrations run successfully");

            AppState::new(Arc::new(PgStore::new(pool)), config.booking.clone())
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; bookings are lost on shutdown");
            AppState::new(Arc::new(MemoryStore::seeded()?), config.booking.clone())
        }
    };

    let app = create_routes(state, &config.http);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
