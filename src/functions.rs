// Standard library
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tokio::signal::ctrl_c;
use tracing::{error, info, warn};

// Project imports
use crate::discovery::{DiscoverPool, HttpFinder};
use crate::engine::{SyncEngine, Task};
use crate::providers::cloudflare::types::Cloudflare;
use crate::settings::types::ConfigManager;

/// Builds the sync engine from the loaded settings and drives it until a
/// shutdown signal arrives.
///
/// This function:
/// - Creates the Cloudflare syncer from the provider configuration
/// - Registers every configured IP echo finder, in order
/// - Registers every configured record task
/// - Blocks on the engine loop; Ctrl+C stops it after the cycle in flight
pub async fn run(config: Arc<ConfigManager>) -> Result<(), Box<dyn Error>> {
    let settings = config.get_settings().await;

    let cloudflare = Cloudflare::new(settings.cloudflare.clone(), settings.cache.ttl)?;
    info!(zone = %cloudflare.config.name, "🌐 DNS provider ready");

    let mut pool = DiscoverPool::new();
    for finder in &settings.finders {
        if finder.server_uri.is_empty() {
            warn!(finder = %finder.name, "Skipping finder without a server_uri");
            continue;
        }
        pool.add(Arc::new(HttpFinder::new(
            finder.name.clone(),
            finder.server_uri.clone(),
            finder.key.clone(),
        )));
    }
    if pool.is_empty() {
        warn!("No discovery finder configured; records cannot sync until one is added");
    }

    let engine = Arc::new(
        SyncEngine::new(Arc::new(cloudflare), Arc::new(pool))
            .with_base_interval(Duration::from_secs(settings.update.interval)),
    );

    for task in &settings.tasks {
        if task.rr.is_empty() || task.domain.is_empty() {
            warn!(task = %task.name, "Skipping task without rr/domain");
            continue;
        }
        info!(
            "🕰️ Keeping {}.{} in sync every {} seconds",
            task.rr, task.domain, task.interval
        );
        engine
            .add(Task::new(
                task.name.clone(),
                task.rr.clone(),
                task.domain.clone(),
                Duration::from_secs(task.interval),
            ))
            .await;
    }

    // Drop the settings lock
    drop(settings);

    // Ctrl+C flips the engine's running flag; the loop exits after the
    // cycle in flight.
    let stopper = Arc::clone(&engine);
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, finishing the current cycle...");
        stopper.stop();
    });

    engine.run().await;
    Ok(())
}
