/// Cloudflare API v4 endpoint.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Timeout for record fetch requests.
pub const FETCH_TIMEOUT_SECS: u64 = 10;
