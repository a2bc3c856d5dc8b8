use anyhow::Context;

use dukascan_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dukascan_observability::init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let table = config
        .open_table()
        .with_context(|| format!("failed to open table {:?}", config.sheet_name))?;

    let app = dukascan_api::app::build_app(table);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
