// Standard library
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::time::{Duration, Instant};

/// Rate limiting configuration for provider API calls
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per time window
    pub max_requests: u32,
    /// Time window in seconds
    pub window_secs: u64,
}

/// A token bucket rate limiter implementation
pub struct TokenBucketRateLimiter {
    pub(crate) semaphore: Arc<Semaphore>,
    pub(crate) max_permits: usize,
    pub(crate) window: Duration,
    pub(crate) last_refill: tokio::sync::Mutex<Instant>,
}
