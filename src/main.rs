use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_schema_proxy::{
    config::AppConfig, server, AppState, FileQuotaStore, RequestLogger, YouTubeClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("video_schema_proxy=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tokio::fs::create_dir_all(&config.data_dir).await?;

    let fetcher = Arc::new(YouTubeClient::new(
        config.youtube_api_key.clone(),
        config.upstream_timeout,
    )?);
    let quota = Arc::new(FileQuotaStore::new(
        config.counter_path(),
        config.max_daily_requests,
    ));
    let request_log = Arc::new(RequestLogger::new(config.log_path()));

    let state = AppState {
        fetcher,
        quota,
        request_log,
    };
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Video schema proxy listening on http://{}", addr);
    info!("  - daily request limit: {}", config.max_daily_requests);
    info!("  - data directory: {}", config.data_dir.display());
    axum::serve(listener, app).await?;

    Ok(())
}
