use anyhow::{Context, Result};
use delivery_client::{
    bootstrap, config,
    mock_backend::{self, MockState, OPENAPI_PATH},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_env();
    bootstrap::init_tracing();

    let config = config::load()?;
    let addr = config.mock_backend.addr;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Mock backend listening on http://{}", addr);
    tracing::info!("OpenAPI document at http://{}{}", addr, OPENAPI_PATH);
    mock_backend::serve(listener, MockState::seeded())
        .await
        .context("Mock backend stopped")?;
    Ok(())
}
