use std::{sync::Arc, time::Duration};

use anime_ledger_api::{
    config::Config,
    db::{create_pool, run_migrations, PgListRepository},
    routes::{create_router, AppState},
    services::catalog::JikanClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;

    let catalog = JikanClient::new(
        config.jikan_api_url.clone(),
        Duration::from_secs(config.jikan_timeout_secs),
    )?;

    let state = AppState::new(Arc::new(PgListRepository::new(pool)), Arc::new(catalog));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
