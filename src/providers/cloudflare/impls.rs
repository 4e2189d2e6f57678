// Standard library
use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

// 3rd party crates
use async_trait::async_trait;
use futures::try_join;

// Project imports
use crate::engine::{AddressPair, BoxError, DomainSyncer};
use crate::utility::cache::{CachedRecord, SharedRecordCache};
use crate::utility::rate_limiter::types::TokenBucketRateLimiter;

// Current module imports
use super::errors::{CloudflareError, CloudflareValidationError};
use super::functions::{create_reqwest_client, ensure_record, verify_zone_status};
use super::types::{CfConfig, Cloudflare, RecordKind};

impl CfConfig {
    pub fn validate(&self) -> Result<(), CloudflareValidationError> {
        if self.zone_id.trim().is_empty() {
            return Err(CloudflareValidationError::MissingZoneId);
        }

        if self.api_token.trim().is_empty() {
            return Err(CloudflareValidationError::MissingApiToken);
        }

        if self.name.trim().is_empty() {
            return Err(CloudflareValidationError::MissingName);
        }

        if self.rate_limit.max_requests == 0 {
            return Err(CloudflareValidationError::InvalidRateLimit(
                "max_requests must be greater than 0".into(),
            ));
        }

        if self.rate_limit.window_secs == 0 {
            return Err(CloudflareValidationError::InvalidRateLimit(
                "window_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Full record name for a subdomain of a parent domain. An empty `rr`
/// addresses the domain apex.
pub(super) fn record_name(rr: &str, domain: &str) -> String {
    if rr.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", rr, domain)
    }
}

impl Cloudflare {
    pub fn new(config: CfConfig, cache_ttl_seconds: u64) -> Result<Self, CloudflareError> {
        let client = create_reqwest_client(&config)?;
        let limiter = Arc::new(TokenBucketRateLimiter::new(config.rate_limit.clone()));
        Ok(Self {
            config,
            client,
            cache: SharedRecordCache::new(cache_ttl_seconds),
            limiter,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Runs an API call under the zone's rate limit.
    pub(super) async fn with_rate_limit<F, T>(&self, op: F) -> Result<T, CloudflareError>
    where
        F: Future<Output = Result<T, CloudflareError>>,
    {
        use crate::utility::rate_limiter::traits::RateLimiter;

        if !self.limiter.acquire().await {
            return Err(CloudflareError::RateLimited(self.config.name.clone()));
        }
        let result = op.await;
        self.limiter.release().await;
        result
    }
}

#[async_trait]
impl DomainSyncer for Cloudflare {
    /// Served from the local cache; a record this syncer has never written
    /// (or whose entry aged out) reads as absent.
    async fn query(&self, rr: &str, domain: &str) -> Result<AddressPair, BoxError> {
        let record = record_name(rr, domain);
        Ok(self
            .cache
            .get(&record)
            .await
            .map(|cached| cached.addresses)
            .unwrap_or_default())
    }

    async fn modify(
        &self,
        rr: &str,
        domain: &str,
        v4: Ipv4Addr,
        v6: Option<Ipv6Addr>,
    ) -> Result<(), BoxError> {
        let record = record_name(rr, domain);

        let zone = self.with_rate_limit(verify_zone_status(self)).await?;
        if !zone.result.status.eq_ignore_ascii_case("active") {
            return Err(CloudflareError::InactiveZone(
                self.config.name.clone(),
                zone.result.status,
            )
            .into());
        }

        let content_v4 = v4.to_string();
        let publish_v4 = ensure_record(self, &record, RecordKind::A, &content_v4);
        match v6 {
            Some(v6) => {
                let content_v6 = v6.to_string();
                let publish_v6 = ensure_record(self, &record, RecordKind::Aaaa, &content_v6);
                try_join!(publish_v4, publish_v6)?;
            }
            None => publish_v4.await?,
        }

        self.cache
            .insert(
                record,
                CachedRecord::new(AddressPair { v4: Some(v4), v6 }),
            )
            .await;
        Ok(())
    }
}
