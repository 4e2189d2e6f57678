// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::providers::cloudflare::types::CfConfig;

// Current module imports
use super::constants::{
    default_cache_ttl, default_finder_key, default_log_level, default_task_interval,
    default_update_interval,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Update {
    /// Engine base tick in seconds; each tick scans for due tasks.
    #[serde(default = "default_update_interval")]
    pub interval: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Cache {
    /// Record cache TTL in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
}

/// One DNS record to keep in sync.
#[derive(Debug, Deserialize, Clone)]
pub struct TaskConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rr: String,
    #[serde(default)]
    pub domain: String,
    /// Seconds between syncs of this record.
    #[serde(default = "default_task_interval")]
    pub interval: u64,
}

/// One IP echo endpoint used for public address discovery.
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub server_uri: String,
    /// JSON field holding the IPv4 address in the response.
    #[serde(default = "default_finder_key")]
    pub key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub log: Log,
    pub update: Update,
    pub cache: Cache,

    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
    #[serde(default)]
    pub finders: Vec<FinderConfig>,

    pub cloudflare: CfConfig,
}

/// Manages the application settings, allowing for loading and reloading configurations.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub _config_path: PathBuf,
}

/// Settings that passed [`Settings::validate`] at construction time.
pub struct ValidatedSettings(pub(super) Settings);
