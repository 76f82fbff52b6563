//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the
//! REST server (with OpenAPI/Swagger UI). The workspace's main `medq-run`
//! binary also loads `.env` configuration.

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use medq_core::{config::hospital_id_from_env_value, CoreConfig, DEFAULT_QUEUE_DATA_DIR};

/// Main entry point for the MedQ REST API server.
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000). Provides HTTP endpoints for check-in, status transitions,
/// and per-doctor queue views with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `MEDQ_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `MEDQ_DATA_DIR`: Directory for queue data storage (default: "queue_data")
/// - `MEDQ_HOSPITAL_ID`: Tenant UUID stamped on new visits (default: nil UUID)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDQ_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MedQ REST API on {}", addr);

    let queue_data_dir = PathBuf::from(
        std::env::var("MEDQ_DATA_DIR").unwrap_or_else(|_| DEFAULT_QUEUE_DATA_DIR.into()),
    );
    let hospital_id = hospital_id_from_env_value(std::env::var("MEDQ_HOSPITAL_ID").ok())?;

    let cfg = Arc::new(CoreConfig::new(queue_data_dir, hospital_id)?);
    let app = api_rest::router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
