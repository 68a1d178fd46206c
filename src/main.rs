use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use h2h_backend::api::build_router;
use h2h_backend::config::AppConfig;
use h2h_backend::fs_store::FsStore;
use h2h_backend::store::LeagueStore;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,h2h_backend=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(FsStore::new(config.data_dir.clone()));
    let leagues = store
        .list_leagues()
        .with_context(|| format!("open league root {}", config.data_dir.display()))?;
    info!(
        "serving {} leagues from {}",
        leagues.len(),
        config.data_dir.display()
    );

    let app = build_router(store, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    info!("h2h backend listening on http://{}", config.bind);
    axum::serve(listener, app).await.context("http server")?;
    Ok(())
}
