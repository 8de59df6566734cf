//! Balado server - HTTP API for podcast audio generation

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;
mod state;

use balado_core::{GeminiClient, PodcastConfig, PodcastGenerator, ServerConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "balado_server=debug,balado_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Balado server");

    let config = PodcastConfig::default();
    info!("Output directory: {:?}", config.output_dir);

    let client = GeminiClient::from_env()?;
    let generator = PodcastGenerator::new(client, config);
    let state = AppState::new(generator);

    // Build router
    let app = api::create_router(state);

    // Start server
    let server = ServerConfig::default();
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
