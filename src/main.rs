// Standard library
use std::sync::Arc;

// 3rd party crates
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project modules
mod discovery;
mod engine;
mod functions;
mod metrics;
mod providers;
mod settings;
mod utility;

// Project imports
use crate::functions::run;
use crate::settings::types::ConfigManager;

/// Main entry point for the DDNS daemon.
/// This application discovers the host's public IP address through a chain
/// of IP echo services and updates DNS records when the value changes.
///
/// Features:
/// - Ordered discovery chain with fallback
/// - Independent per-record sync schedules
/// - Local record cache to avoid redundant provider writes
/// - Rate limiting to respect API limits
/// - Detailed logging
#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    // Create ConfigManager and wrap it in Arc
    let config: Arc<ConfigManager> = Arc::new(
        ConfigManager::new()
            .await
            .expect("Failed to initialize configuration"),
    );

    // setup logging.
    let log_level: String = config.get_log_level().await;

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(log_level)
        .add_directive("hyper_util=error".parse().unwrap())
        .add_directive("reqwest=error".parse().unwrap())
        .add_directive("hyper=error".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();

    info!("⚙️ Settings have been loaded.");

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
    }

    info!("Shutdown complete.");
}
