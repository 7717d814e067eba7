mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod router;
mod routes;
mod server;
mod state;
mod upstream;

use anyhow::Context;
use config::Config;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("signing-relay starting");

    let config = Config::from_env()?;
    config.log_startup();

    let state = AppState::from_config(config)?;
    let address = state.config.bind_address();
    let header_timeout = state.config.keep_alive_timeout;
    tracing::info!(
        "Relaying {} routes to {}",
        routes::ENDPOINTS.len(),
        state.upstream.base_url()
    );

    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to address {}", address))?;

    tracing::info!("Listening on {}", address);
    server::serve(listener, app, header_timeout, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}
