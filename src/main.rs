use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tigertix::config::AppConfig;
use tigertix::db;
use tigertix::services::ai::build_provider;
use tigertix::services::catalog::{EventCatalog, HttpCatalog, SqliteCatalog};
use tigertix::services::matcher::EventMatcher;
use tigertix::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let llm = build_provider(&config)?;

    let catalog: Box<dyn EventCatalog> = match &config.catalog_url {
        Some(url) => {
            tracing::info!(url = %url, "using HTTP events catalog");
            Box::new(HttpCatalog::new(url.clone()))
        }
        None => {
            tracing::info!(path = %config.database_url, "using SQLite events catalog");
            Box::new(SqliteCatalog::new(db::open_catalog(&config.database_url)?))
        }
    };

    let state = Arc::new(AppState {
        llm,
        catalog,
        matcher: EventMatcher::default(),
    });

    let app = tigertix::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
