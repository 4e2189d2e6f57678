// 3rd party crates
use thiserror::Error;

use super::traits::BoxError;

/// Per-task failure classification consumed by the engine loop.
///
/// Every variant is recoverable: the loop logs it and leaves the task to be
/// retried on its next due cycle. Nothing here propagates to the process.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("public address discovery failed: {0}")]
    Discovery(#[source] BoxError),

    #[error("discovery produced no IPv4 address")]
    NoIpv4,

    #[error("domain record query failed: {0}")]
    Query(#[source] BoxError),

    #[error("domain record modify failed: {0}")]
    Modify(#[source] BoxError),
}
