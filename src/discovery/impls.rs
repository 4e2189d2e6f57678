// Standard library
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

// Project imports
use crate::engine::{AddressPair, BoxError, PublicDiscover};

use super::constants::REQUEST_TIMEOUT_SECS;
use super::errors::DiscoverError;
use super::types::{DiscoverPool, HttpFinder};

impl DiscoverPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source at the end of the chain.
    pub fn add(&mut self, source: Arc<dyn PublicDiscover>) {
        self.sources.push(source);
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl PublicDiscover for DiscoverPool {
    /// Tries each source in registration order and stops at the first one
    /// returning an IPv4 address. When none qualifies, the last attempted
    /// result is returned as-is so the caller sees the most recent failure.
    async fn discover(&self, rr: &str, domain: &str) -> Result<AddressPair, BoxError> {
        if self.sources.is_empty() {
            return Err(DiscoverError::NoSource.into());
        }
        let mut last: Result<AddressPair, BoxError> = Err(DiscoverError::NoSource.into());
        for source in &self.sources {
            last = source.discover(rr, domain).await;
            if let Ok(pair) = &last {
                if pair.v4.is_some() {
                    break;
                }
            }
        }
        last
    }
}

impl HttpFinder {
    pub fn new(
        name: impl Into<String>,
        server_uri: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            server_uri: server_uri.into(),
            key: json_pointer(&key.into()),
            client: Client::new(),
        }
    }
}

/// Normalizes a configured field key into a JSON pointer: `ip` and
/// `data.ip` become `/ip` and `/data/ip`; a leading slash is kept as-is.
fn json_pointer(key: &str) -> String {
    if key.starts_with('/') {
        key.to_string()
    } else {
        format!("/{}", key.replace('.', "/"))
    }
}

/// Pulls the IPv4 address out of an IP-echo response body.
fn extract_ipv4(service: &str, key: &str, body: &Value) -> Result<Ipv4Addr, DiscoverError> {
    let field = body
        .pointer(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DiscoverError::MissingField {
            service: service.to_string(),
            key: key.to_string(),
        })?;
    field
        .trim()
        .parse()
        .map_err(|_| DiscoverError::ParseIp {
            service: service.to_string(),
            value: field.to_string(),
        })
}

#[async_trait]
impl PublicDiscover for HttpFinder {
    async fn discover(&self, _rr: &str, _domain: &str) -> Result<AddressPair, BoxError> {
        let response = self
            .client
            .get(&self.server_uri)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|error| DiscoverError::Request {
                service: self.name.clone(),
                error,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(finder = %self.name, %status, "IP echo service answered with an error status");
            return Err(DiscoverError::Status {
                service: self.name.clone(),
                status,
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|error| DiscoverError::Body {
            service: self.name.clone(),
            error,
        })?;
        let ipv4 = extract_ipv4(&self.name, &self.key, &body)?;

        debug!(finder = %self.name, %ipv4, "public IPv4 discovered");
        Ok(AddressPair::v4_only(ipv4))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    struct StaticSource {
        result: Result<AddressPair, &'static str>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn ok(v4: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(AddressPair::v4_only(v4.parse().unwrap())),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: Err("unreachable"),
                calls: AtomicUsize::new(0),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                result: Ok(AddressPair::default()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PublicDiscover for StaticSource {
        async fn discover(&self, _rr: &str, _domain: &str) -> Result<AddressPair, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.map_err(Into::into)
        }
    }

    #[tokio::test]
    async fn empty_pool_fails_with_no_source() {
        let pool = DiscoverPool::new();
        let err = pool.discover("", "").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoverError>(),
            Some(DiscoverError::NoSource)
        ));
    }

    #[tokio::test]
    async fn chain_falls_back_to_the_first_working_source() {
        let failing = StaticSource::failing();
        let working = StaticSource::ok("127.0.0.1");
        let mut pool = DiscoverPool::new();
        pool.add(failing.clone());
        pool.add(working.clone());

        let pair = pool.discover("", "").await.unwrap();
        assert_eq!(pair.v4, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(failing.calls(), 1);
        assert_eq!(working.calls(), 1);
    }

    #[tokio::test]
    async fn chain_short_circuits_on_first_success() {
        let first = StaticSource::ok("1.2.3.4");
        let second = StaticSource::ok("5.6.7.8");
        let mut pool = DiscoverPool::new();
        pool.add(first.clone());
        pool.add(second.clone());

        let pair = pool.discover("", "").await.unwrap();
        assert_eq!(pair.v4, Some("1.2.3.4".parse().unwrap()));
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn chain_reports_the_last_failure_when_all_sources_fail() {
        let mut pool = DiscoverPool::new();
        pool.add(StaticSource::failing());
        pool.add(StaticSource::failing());

        assert!(pool.discover("", "").await.is_err());
    }

    #[tokio::test]
    async fn source_with_no_ipv4_is_passed_over() {
        let empty = StaticSource::empty();
        let working = StaticSource::ok("9.9.9.9");
        let mut pool = DiscoverPool::new();
        pool.add(empty.clone());
        pool.add(working.clone());

        let pair = pool.discover("", "").await.unwrap();
        assert_eq!(pair.v4, Some("9.9.9.9".parse().unwrap()));
        assert_eq!(empty.calls(), 1);
    }

    #[test]
    fn keys_normalize_to_json_pointers() {
        assert_eq!(json_pointer("/ip"), "/ip");
        assert_eq!(json_pointer("ip"), "/ip");
        assert_eq!(json_pointer("data.addr"), "/data/addr");
    }

    #[test]
    fn extracts_address_from_flat_and_nested_bodies() {
        let flat = json!({ "ip": "9.9.9.9" });
        assert_eq!(
            extract_ipv4("t", "/ip", &flat).unwrap(),
            "9.9.9.9".parse::<Ipv4Addr>().unwrap()
        );

        let nested = json!({ "data": { "addr": "10.0.0.1" } });
        assert_eq!(
            extract_ipv4("t", "/data/addr", &nested).unwrap(),
            "10.0.0.1".parse::<Ipv4Addr>().unwrap()
        );
    }

    #[test]
    fn missing_or_malformed_fields_fail_cleanly() {
        let body = json!({ "ip": "not-an-address" });
        assert!(matches!(
            extract_ipv4("t", "/ip", &body),
            Err(DiscoverError::ParseIp { .. })
        ));
        assert!(matches!(
            extract_ipv4("t", "/address", &body),
            Err(DiscoverError::MissingField { .. })
        ));
        // An IPv6 value in the configured field is not a usable IPv4.
        let v6 = json!({ "ip": "::1" });
        assert!(matches!(
            extract_ipv4("t", "/ip", &v6),
            Err(DiscoverError::ParseIp { .. })
        ));
    }
}
