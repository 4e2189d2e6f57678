// Standard library
use std::sync::Arc;

// 3rd party crates
use reqwest::Client;

// Project imports
use crate::engine::PublicDiscover;

/// Ordered fallback chain over discovery sources.
///
/// Sources are registered once at startup and tried strictly in
/// registration order on every lookup.
#[derive(Default)]
pub struct DiscoverPool {
    pub(crate) sources: Vec<Arc<dyn PublicDiscover>>,
}

/// Discovery source backed by an HTTP IP-echo service returning JSON.
pub struct HttpFinder {
    /// Informational name used in logs.
    pub name: String,
    /// Endpoint queried with a plain GET.
    pub server_uri: String,
    /// JSON pointer to the response field holding the IPv4 address.
    pub key: String,
    pub(crate) client: Client,
}
