// Standard library
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// 3rd party crates
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

// Project imports
use crate::metrics::MetricsManager;

use super::errors::SyncError;
use super::traits::{DomainSyncer, PublicDiscover};
use super::types::{AddressPair, SyncEngine, SyncOutcome, Task};

impl SyncEngine {
    /// Creates an engine with the default one second base tick.
    pub fn new(syncer: Arc<dyn DomainSyncer>, discover: Arc<dyn PublicDiscover>) -> Self {
        Self {
            base_interval: Duration::from_secs(1),
            syncer,
            discover,
            tasks: RwLock::new(Vec::new()),
            running: AtomicBool::new(false),
            metrics: MetricsManager::new(),
        }
    }

    /// Overrides the base tick interval slept between cycles.
    pub fn with_base_interval(mut self, interval: Duration) -> Self {
        self.base_interval = interval;
        self
    }

    /// Registers a task. Safe to call while the loop is running; the task
    /// is picked up on the next cycle. There is no removal.
    pub async fn add(&self, task: Task) {
        self.tasks.write().await.push(task);
    }

    /// Starts the loop on a background tokio task and returns immediately.
    ///
    /// Not guarded against repeated calls: calling this twice starts two
    /// loops. Pair with [`SyncEngine::stop`].
    pub fn start(self: &Arc<Self>) {
        self.running.store(true, Ordering::SeqCst);
        let engine = Arc::clone(self);
        tokio::spawn(async move { engine.loop_sync().await });
    }

    /// Signals the loop to exit. Observed at the top of the next iteration;
    /// a cycle already in flight runs to completion.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Drives the loop on the caller's own execution context, blocking
    /// until [`SyncEngine::stop`] is called. This is the entry point for a
    /// long-lived process.
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        self.loop_sync().await;
    }

    /// Counters recorded by the loop.
    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    async fn loop_sync(&self) {
        while self.running.load(Ordering::SeqCst) {
            self.proc_sync().await;
            tokio::time::sleep(self.base_interval).await;
        }
    }

    /// Runs one cycle: scans every registered task in registration order,
    /// skipping tasks not yet due. A task's failure never aborts the scan.
    pub(crate) async fn proc_sync(&self) {
        self.metrics.record_cycle().await;
        let now = Instant::now();
        // The registry is append-only, so indices collected here stay valid
        // even if tasks are added mid-cycle.
        let due: Vec<usize> = self
            .tasks
            .read()
            .await
            .iter()
            .enumerate()
            .filter(|(_, task)| task.is_due(now))
            .map(|(idx, _)| idx)
            .collect();

        for idx in due {
            let (name, rr, domain, fqdn) = {
                let tasks = self.tasks.read().await;
                let task = &tasks[idx];
                (
                    task.name.clone(),
                    task.rr.clone(),
                    task.domain.clone(),
                    task.fqdn(),
                )
            };

            match self.sync_task(&rr, &domain, &fqdn).await {
                Ok(SyncOutcome::Updated(pair)) => {
                    self.tasks.write().await[idx].last = Some(Instant::now());
                    self.metrics.record_update(pair).await;
                    info!(
                        task = %name,
                        record = %fqdn,
                        ipv4 = ?pair.v4,
                        ipv6 = ?pair.v6,
                        "domain record synced"
                    );
                }
                Ok(SyncOutcome::InSync(pair)) => {
                    self.metrics.record_in_sync().await;
                    debug!(
                        task = %name,
                        record = %fqdn,
                        ipv4 = ?pair.v4,
                        "domain record already in sync"
                    );
                }
                Err(e @ (SyncError::Discovery(_) | SyncError::NoIpv4)) => {
                    self.metrics.record_discovery_failure().await;
                    warn!(task = %name, record = %fqdn, error = %e, "sync skipped");
                }
                Err(e) => {
                    self.metrics.record_modify_failure().await;
                    warn!(task = %name, record = %fqdn, error = %e, "sync failed");
                }
            }
        }
    }

    /// The per-task cycle: discover, query, compare, conditionally modify.
    async fn sync_task(
        &self,
        rr: &str,
        domain: &str,
        fqdn: &str,
    ) -> Result<SyncOutcome, SyncError> {
        let discovered = self
            .discover
            .discover(rr, domain)
            .await
            .map_err(SyncError::Discovery)?;
        let v4_new = discovered.v4.ok_or(SyncError::NoIpv4)?;

        let having = match self.syncer.query(rr, domain).await.map_err(SyncError::Query) {
            Ok(having) => having,
            Err(e) => {
                // Published state is unknown after a failed read; fall
                // through to the idempotent modify below.
                warn!(record = %fqdn, error = %e, "query failed, state treated as unknown");
                AddressPair::default()
            }
        };

        if having.v4 == Some(v4_new) && having.v6 == discovered.v6 {
            return Ok(SyncOutcome::InSync(discovered));
        }

        self.syncer
            .modify(rr, domain, v4_new, discovered.v6)
            .await
            .map_err(SyncError::Modify)?;
        Ok(SyncOutcome::Updated(discovered))
    }
}
