// Standard library
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

// 3rd party crates
use tokio::sync::RwLock;
use tracing::debug;

// Project imports
use crate::engine::AddressPair;

/// Last addresses confirmed published for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedRecord {
    pub addresses: AddressPair,
    pub timestamp: Instant,
}

impl CachedRecord {
    pub fn new(addresses: AddressPair) -> Self {
        Self {
            addresses,
            timestamp: Instant::now(),
        }
    }
}

/// Map of record name to the most recently published addresses.
///
/// Entries age out after the configured TTL, which makes the next sync
/// cycle re-assert the record through the idempotent write path.
pub struct RecordCache {
    records: HashMap<String, CachedRecord>,
    ttl: Duration,
}

impl RecordCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            records: HashMap::new(),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub fn get(&self, record: &str) -> Option<CachedRecord> {
        self.records.get(record).and_then(|cached| {
            if cached.timestamp.elapsed() < self.ttl {
                Some(cached.clone())
            } else {
                None
            }
        })
    }

    pub fn insert(&mut self, record: String, cached: CachedRecord) {
        self.records.insert(record, cached);
    }

    pub fn invalidate(&mut self, record: &str) {
        if self.records.remove(record).is_some() {
            debug!("cache entry invalidated for record: {}", record);
        }
    }
}

/// Cloneable handle sharing one [`RecordCache`] between the syncer's
/// readers and its single writer.
#[derive(Clone)]
pub struct SharedRecordCache(Arc<RwLock<RecordCache>>);

impl fmt::Debug for SharedRecordCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRecordCache")
            .field("inner", &"<RecordCache>")
            .finish()
    }
}

impl SharedRecordCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self(Arc::new(RwLock::new(RecordCache::new(ttl_seconds))))
    }

    pub async fn get(&self, record: &str) -> Option<CachedRecord> {
        self.0.read().await.get(record)
    }

    pub async fn insert(&self, record: String, cached: CachedRecord) {
        self.0.write().await.insert(record, cached);
    }

    pub async fn invalidate(&self, record: &str) {
        self.0.write().await.invalidate(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(v4: &str) -> AddressPair {
        AddressPair::v4_only(v4.parse().unwrap())
    }

    #[test]
    fn fresh_entries_are_served() {
        let mut cache = RecordCache::new(3600);
        cache.insert("www.example.com".into(), CachedRecord::new(pair("1.2.3.4")));
        assert_eq!(
            cache.get("www.example.com").map(|c| c.addresses),
            Some(pair("1.2.3.4"))
        );
        assert!(cache.get("other.example.com").is_none());
    }

    #[test]
    fn entries_age_out_after_the_ttl() {
        let mut cache = RecordCache::new(0);
        cache.insert("www.example.com".into(), CachedRecord::new(pair("1.2.3.4")));
        assert!(cache.get("www.example.com").is_none());
    }

    #[test]
    fn invalidation_drops_the_entry() {
        let mut cache = RecordCache::new(3600);
        cache.insert("www.example.com".into(), CachedRecord::new(pair("1.2.3.4")));
        cache.invalidate("www.example.com");
        assert!(cache.get("www.example.com").is_none());
    }

    #[tokio::test]
    async fn shared_cache_round_trips() {
        let cache = SharedRecordCache::new(3600);
        cache
            .insert("www.example.com".into(), CachedRecord::new(pair("1.2.3.4")))
            .await;
        assert_eq!(
            cache.get("www.example.com").await.map(|c| c.addresses),
            Some(pair("1.2.3.4"))
        );
    }
}
