// Standard library
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::Instant;

use super::traits::RateLimiter;
use super::types::{RateLimitConfig, TokenBucketRateLimiter};

impl TokenBucketRateLimiter {
    /// Create a new token bucket rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(config.max_requests as usize)),
            max_permits: config.max_requests as usize,
            window: Duration::from_secs(config.window_secs),
            last_refill: tokio::sync::Mutex::new(Instant::now()),
        }
    }

    /// Refill the bucket back to capacity once the window has passed
    async fn try_refill(&self) {
        let mut last_refill = self.last_refill.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(*last_refill);

        if elapsed >= self.window {
            let available = self.semaphore.available_permits();
            if available < self.max_permits {
                self.semaphore.add_permits(self.max_permits - available);
            }
            *last_refill = now;
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucketRateLimiter {
    async fn acquire(&self) -> bool {
        self.try_refill().await;
        match self.semaphore.try_acquire() {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    async fn release(&self) {
        self.semaphore.add_permits(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_secs: u64) -> TokenBucketRateLimiter {
        TokenBucketRateLimiter::new(RateLimitConfig {
            max_requests,
            window_secs,
        })
    }

    #[tokio::test]
    async fn acquires_up_to_capacity() {
        let limiter = limiter(2, 3600);
        assert!(limiter.acquire().await);
        assert!(limiter.acquire().await);
        assert!(!limiter.acquire().await);
    }

    #[tokio::test]
    async fn release_returns_a_slot() {
        let limiter = limiter(1, 3600);
        assert!(limiter.acquire().await);
        assert!(!limiter.acquire().await);
        limiter.release().await;
        assert!(limiter.acquire().await);
    }

    #[tokio::test]
    async fn refill_restores_capacity_after_the_window() {
        let limiter = limiter(1, 0);
        assert!(limiter.acquire().await);
        // Zero-length window: the next acquire refills immediately.
        assert!(limiter.acquire().await);
    }
}
