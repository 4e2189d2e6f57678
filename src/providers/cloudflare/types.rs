// Standard library
use std::fmt;
use std::sync::Arc;

// 3rd party crates
use reqwest::Client;
use serde::Deserialize;

// Project imports
use crate::utility::cache::SharedRecordCache;
use crate::utility::rate_limiter::traits::RateLimiter;
use crate::utility::rate_limiter::types::RateLimitConfig;

/// Cloudflare-backed domain syncer.
///
/// Keeps a local cache of the addresses it last confirmed published, so the
/// engine's read path costs no API call.
pub struct Cloudflare {
    pub config: CfConfig,
    pub client: Client,
    pub(crate) cache: SharedRecordCache,
    pub(crate) limiter: Arc<dyn RateLimiter>,
}

/// Configuration for Cloudflare API interactions.
#[derive(Debug, Deserialize, Clone)]
pub struct CfConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Zone name, e.g. `example.com`. Used for logging.
    pub name: String,
    pub zone_id: String,
    pub api_token: String,
    /// Whether created records go behind the Cloudflare proxy.
    #[serde(default)]
    pub proxied: bool,
    #[serde(default = "default_rate_limit")]
    pub rate_limit: RateLimitConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_rate_limit() -> RateLimitConfig {
    RateLimitConfig {
        max_requests: 30,
        window_secs: 60,
    }
}

/// DNS record types managed by the syncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    A,
    Aaaa,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the response from a DNS record request.
#[derive(Debug, Deserialize)]
pub struct DnsResponse {
    pub result: Vec<DnsResponseResult>,
}

/// Details of the DNS response result.
#[derive(Debug, Deserialize)]
pub struct DnsResponseResult {
    pub id: String,
    pub content: String,
}

/// Represents the response from a zone request.
#[derive(Debug, Deserialize)]
pub struct ZoneResponse {
    pub result: ZoneResponseResult,
    pub success: bool,
}

/// Details of the zone response result.
#[derive(Debug, Deserialize)]
pub struct ZoneResponseResult {
    pub status: String,
}
