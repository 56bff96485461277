//! Pricing server binary.
//!
//! Reads configuration from the environment (see `config`), connects the
//! catalog database pool, starts the trip cache warmer and serves the API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voyage_pricing::cache::{start_cache_warmer, AppCache};
use voyage_pricing::config::Config;
use voyage_pricing::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Starting voyage-pricing on {}", config.bind_addr());

    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("Database pool ready");

    let cache = AppCache::new(config.trip_cache_ttl);
    tokio::spawn(start_cache_warmer(
        cache.clone(),
        db.clone(),
        config.default_currency.clone(),
    ));

    let addr = config.bind_addr();
    let state = AppState {
        db,
        cache,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
