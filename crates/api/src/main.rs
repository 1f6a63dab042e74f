use anyhow::Context;

use waterwatch_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    waterwatch_observability::init();

    let cfg = ApiConfig::from_env().context("invalid configuration")?;
    let app = waterwatch_api::app::build_app(&cfg).context("failed to build gateways")?;

    let addr = cfg.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, analyzer = ?cfg.gateway.analyzer, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
