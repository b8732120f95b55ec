// Main entry point - Dependency injection and server setup
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use serial_telemetry::application::byte_source::SourceConnector;
use serial_telemetry::application::ingest_service::IngestService;
use serial_telemetry::application::pipeline::TelemetryPipeline;
use serial_telemetry::infrastructure::broadcast_sink::BroadcastSink;
use serial_telemetry::infrastructure::config::load_config;
use serial_telemetry::infrastructure::connectors::connector_for;
use serial_telemetry::presentation::app_state::AppState;
use serial_telemetry::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Create the pipeline and its viewers' channel
    let updates = BroadcastSink::new(config.server.channel_capacity);
    let pipeline = Arc::new(Mutex::new(TelemetryPipeline::new(&config.pipeline, updates.clone())?));

    // Drive it from the configured source
    let ingest = IngestService::new(
        pipeline.clone(),
        config.ingest.tick_interval(),
        config.ingest.reconnect_delay(),
    )?;
    let connector = connector_for(&config.source);
    tracing::info!("Reading telemetry from {}", connector.name());
    tokio::spawn(async move { ingest.run(connector.as_ref()).await });

    // Build router (presentation layer)
    let state = Arc::new(AppState { pipeline, updates });
    let app = router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting serial-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
