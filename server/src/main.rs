use anyhow::Context;
use jobboard_server::{AppState, JobStore, ServerConfig, router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("🚀 Starting Job Board Server...");

    let config = ServerConfig::load()?;
    let store = JobStore::load(&config.jobs_path)
        .with_context(|| format!("Failed to load jobs from {}", config.jobs_path.display()))?;

    let state = AppState::new(store, config.response_delay());
    let app = router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "🌐 Server running");
    tracing::info!("   Try: curl 'http://{}/jobs?search=developer'", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
