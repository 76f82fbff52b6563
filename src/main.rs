//! Main entry point for the MedQ application.
//!
//! Resolves configuration from the environment (with `.env` support) and
//! serves the REST API.

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use medq_core::{config::hospital_id_from_env_value, CoreConfig, DEFAULT_QUEUE_DATA_DIR};

/// Main entry point for the MedQ application.
///
/// # Environment Variables
/// - `MEDQ_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDQ_DATA_DIR`: Directory for queue data storage (default: "queue_data")
/// - `MEDQ_HOSPITAL_ID`: Tenant UUID stamped on new visits (default: nil UUID)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("medq=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDQ_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting MedQ REST on {}", rest_addr);

    let queue_data_dir = PathBuf::from(
        std::env::var("MEDQ_DATA_DIR").unwrap_or_else(|_| DEFAULT_QUEUE_DATA_DIR.into()),
    );
    let hospital_id = hospital_id_from_env_value(std::env::var("MEDQ_HOSPITAL_ID").ok())?;

    let cfg = Arc::new(CoreConfig::new(queue_data_dir, hospital_id)?);
    let app = api_rest::router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
