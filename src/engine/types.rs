// Standard library
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

// 3rd party crates
use tokio::sync::RwLock;

// Project imports
use crate::metrics::MetricsManager;

use super::traits::{DomainSyncer, PublicDiscover};

/// A pair of public addresses, as seen by discovery or as published at the
/// DNS provider. An absent IPv4 is a failed discovery; an absent IPv6 is a
/// normal v4-only host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressPair {
    pub v4: Option<Ipv4Addr>,
    pub v6: Option<Ipv6Addr>,
}

impl AddressPair {
    pub fn v4_only(v4: Ipv4Addr) -> Self {
        Self {
            v4: Some(v4),
            v6: None,
        }
    }
}

/// One DNS record bound to a sync schedule.
#[derive(Debug, Clone)]
pub struct Task {
    /// Informational name used in logs.
    pub name: String,
    /// Record subdomain, e.g. `www`.
    pub rr: String,
    /// Parent domain, e.g. `example.com`.
    pub domain: String,
    /// Minimum time between successful syncs of this record.
    pub interval: Duration,
    /// Completion time of the last successful sync; `None` until the first.
    pub last: Option<Instant>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        rr: impl Into<String>,
        domain: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            rr: rr.into(),
            domain: domain.into(),
            interval,
            last: None,
        }
    }

    /// A task is due when it has never synced or its interval has elapsed.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    /// Fully qualified record name, `rr.domain`.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.rr, self.domain)
    }
}

/// Outcome of one task's sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The provider record already matched the discovered addresses.
    InSync(AddressPair),
    /// The record was written with the discovered addresses.
    Updated(AddressPair),
}

/// Periodic reconciliation engine over a set of registered [`Task`]s.
///
/// One engine owns one syncer and one discovery chain. Construct it
/// explicitly and share it behind an [`Arc`]; multiple independent engines
/// can coexist in one process.
pub struct SyncEngine {
    /// Time slept between cycles.
    pub(crate) base_interval: Duration,
    pub(crate) syncer: Arc<dyn DomainSyncer>,
    pub(crate) discover: Arc<dyn PublicDiscover>,
    /// Registered tasks, scanned in registration order. Append-only.
    pub(crate) tasks: RwLock<Vec<Task>>,
    pub(crate) running: AtomicBool,
    pub(crate) metrics: MetricsManager,
}
