// Standard library
use std::net::{Ipv4Addr, Ipv6Addr};

// 3rd party crates
use async_trait::async_trait;

use super::types::AddressPair;

/// Boxed error carried across the syncer and discovery seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Capability set of a DNS provider adapter.
///
/// Implementations must be safe to share across async tasks. `query` is the
/// cheap read path and is typically served from a local cache populated by
/// prior successful `modify` calls; `modify` must have idempotent "ensure
/// this value is published" semantics (lookup, then create or update).
#[async_trait]
pub trait DomainSyncer: Send + Sync {
    /// Returns the last addresses believed to be published for `rr.domain`.
    ///
    /// A record the syncer has never written resolves to an empty
    /// [`AddressPair`], not an error.
    async fn query(&self, rr: &str, domain: &str) -> Result<AddressPair, BoxError>;

    /// Ensures the record for `rr.domain` publishes the given addresses,
    /// creating or updating it at the provider as needed. On success the
    /// syncer's local cache reflects the new value.
    async fn modify(
        &self,
        rr: &str,
        domain: &str,
        v4: Ipv4Addr,
        v6: Option<Ipv6Addr>,
    ) -> Result<(), BoxError>;
}

/// Capability set of a public IP discovery backend.
#[async_trait]
pub trait PublicDiscover: Send + Sync {
    /// Performs one lookup of the host's current public addresses. The
    /// record hint may be ignored by implementations.
    ///
    /// Must fail cleanly (typed error, no panic) on network errors, error
    /// statuses, and unparseable responses.
    async fn discover(&self, rr: &str, domain: &str) -> Result<AddressPair, BoxError>;
}
