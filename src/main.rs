use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use triage_core::{CoreConfig, QueueService};

/// Main entry point for the triage queue service
///
/// Resolves configuration from the environment once, then serves the REST API until Ctrl-C.
/// All queue state is in memory and is lost when the process exits.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_CLINIC_NAME`: Clinic name shown by the health endpoint (default: "Triage")
/// - `TRIAGE_TOP_SYMPTOMS`: Number of symptoms reported by `/history/stats` (default: 10)
/// - `TRIAGE_CSV_FILENAME`: Filename offered by `/history/download` (default: "historico.csv")
/// - `API_KEY`: When set, required in the `x-api-key` header of mutating requests
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR")
        .unwrap_or_else(|_| triage_core::DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("TRIAGE_CLINIC_NAME").ok(),
        std::env::var("TRIAGE_TOP_SYMPTOMS").ok(),
        std::env::var("TRIAGE_CSV_FILENAME").ok(),
    )?);
    let api_key = std::env::var("API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("API_KEY not set; mutating endpoints are open");
    }

    tracing::info!("++ Starting {} triage REST on {}", cfg.clinic_name(), rest_addr);

    let app = api_rest::router(AppState::new(
        cfg,
        QueueService::with_system_clock(),
        api_key,
    ));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Triage REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
