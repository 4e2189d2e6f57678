// Standard library
use std::sync::Arc;
use std::time::Instant;

// 3rd party crates
use tokio::sync::RwLock;

// Project imports
use crate::engine::AddressPair;

/// Counters for sync operations
#[derive(Debug, Default, Clone)]
pub struct SyncMetrics {
    /// Number of engine cycles run
    pub cycles: u64,
    /// Total number of record writes attempted
    pub update_attempts: u64,
    /// Number of successful record writes
    pub update_successes: u64,
    /// Number of failed record writes
    pub update_failures: u64,
    /// Number of cycles where a record was already in sync
    pub already_in_sync: u64,
    /// Number of cycles skipped because discovery produced no address
    pub discovery_failures: u64,
    /// Last successful write time
    pub last_success: Option<Instant>,
    /// Last failure time
    pub last_failure: Option<Instant>,
    /// IPv4 write metrics
    pub ipv4: VersionMetrics,
    /// IPv6 write metrics
    pub ipv6: VersionMetrics,
}

/// Metrics specific to one IP version
#[derive(Debug, Default, Clone)]
pub struct VersionMetrics {
    /// Number of successful writes carrying this version
    pub successes: u64,
    /// Last value written
    pub last_value: Option<String>,
}

/// Thread-safe metrics recorder shared with the engine loop
#[derive(Debug, Default)]
pub struct MetricsManager {
    metrics: Arc<RwLock<SyncMetrics>>,
}

impl MetricsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of an engine cycle
    pub async fn record_cycle(&self) {
        self.metrics.write().await.cycles += 1;
    }

    /// Records a successful record write
    pub async fn record_update(&self, pair: AddressPair) {
        let mut metrics = self.metrics.write().await;
        metrics.update_attempts += 1;
        metrics.update_successes += 1;
        metrics.last_success = Some(Instant::now());
        if let Some(v4) = pair.v4 {
            metrics.ipv4.successes += 1;
            metrics.ipv4.last_value = Some(v4.to_string());
        }
        if let Some(v6) = pair.v6 {
            metrics.ipv6.successes += 1;
            metrics.ipv6.last_value = Some(v6.to_string());
        }
    }

    /// Records a failed record write
    pub async fn record_modify_failure(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.update_attempts += 1;
        metrics.update_failures += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Records a cycle that found the record already correct
    pub async fn record_in_sync(&self) {
        self.metrics.write().await.already_in_sync += 1;
    }

    /// Records a cycle skipped for lack of a discovered address
    pub async fn record_discovery_failure(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.discovery_failures += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Gets a snapshot of the current metrics
    pub async fn get_snapshot(&self) -> SyncMetrics {
        (*self.metrics.read().await).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn updates_are_counted_per_version() {
        let manager = MetricsManager::new();
        manager
            .record_update(AddressPair {
                v4: Some("1.2.3.4".parse().unwrap()),
                v6: Some("::1".parse().unwrap()),
            })
            .await;
        manager
            .record_update(AddressPair::v4_only("1.2.3.5".parse().unwrap()))
            .await;
        manager.record_modify_failure().await;

        let snapshot = manager.get_snapshot().await;
        assert_eq!(snapshot.update_attempts, 3);
        assert_eq!(snapshot.update_successes, 2);
        assert_eq!(snapshot.update_failures, 1);
        assert_eq!(snapshot.ipv4.successes, 2);
        assert_eq!(snapshot.ipv4.last_value.as_deref(), Some("1.2.3.5"));
        assert_eq!(snapshot.ipv6.successes, 1);
    }
}
