pub mod types;

pub use types::{MetricsManager, SyncMetrics, VersionMetrics};
