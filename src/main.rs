//! Payslip Engine HTTP server.
//!
//! Loads the payment configuration, installs the tracing subscriber and
//! serves the API.
//!
//! Environment:
//! - `PAYSLIP_CONFIG_DIR`: directory holding `payment.yaml` (default `./config/default`)
//! - `PAYSLIP_BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info,payslip_engine=debug`)

use tracing::info;
use tracing_subscriber::EnvFilter;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,payslip_engine=debug")),
        )
        .with_target(true)
        .init();

    let config_dir =
        std::env::var("PAYSLIP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        cycle_start_day = config.payment_config().cycle_start_day,
        currency = %config.payment_config().currency,
        "Configuration loaded"
    );

    let addr = std::env::var("PAYSLIP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Starting payslip engine server");

    axum::serve(listener, create_router(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
