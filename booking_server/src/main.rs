//! Main entry point for the booking server binary

use anyhow::Result;
use booking_core::{
    config::{LogFormat, LoggingConfig},
    create_app_with_config, run_server, AppConfig, AppState, BookingStore, ValidationContext,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_tracing(&config.logging);

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Database URL: {}", config.database.url);

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let validation = ValidationContext::from_config(&config.validation);
    if let Some(bounds) = validation.phone_length {
        info!("Phone length enforced: {}-{} characters", bounds.min, bounds.max);
    }

    let store = BookingStore::open(&config.database, validation).await
        .map_err(|e| anyhow::anyhow!("Failed to open booking store: {}", e))?;

    let state = AppState::new(store.clone());
    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app_with_config(state, &config);

    let served = run_server(app, addr).await;

    store.close().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let level = logging.level.as_str();

            format!(
                "{}={},booking_core={},tower_http=debug",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                level,
                level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    match logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.json())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.pretty())
                .init();
        }
    }
}
