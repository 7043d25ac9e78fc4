use anyhow::Context;

use faculty_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    faculty_observability::init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    let app = faculty_api::app::build_app_from_config(&config.store)
        .await
        .context("failed to initialize teacher store")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
