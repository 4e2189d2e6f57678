/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Engine base tick in seconds; each tick scans for due tasks
[update]
interval = 1

# Seconds a confirmed-published record stays cached before the next
# due cycle re-asserts it
[cache]
ttl = 3600

# Records to keep in sync
[[tasks]]
name = "home"
rr = "www"
domain = "example.com"
# Seconds between syncs of this record
interval = 1800

# Public IP echo services, tried in order
[[finders]]
name = "ipify"
server_uri = "https://api.ipify.org/?format=json"
key = "/ip"

[[finders]]
name = "seeip"
server_uri = "https://api.seeip.org/jsonip"
key = "/ip"

# Cloudflare provider configuration
[cloudflare]
enabled = true
name = "example.com"
zone_id = "your_zone_id"
api_token = "your_api_token"
# Create records behind the Cloudflare proxy
proxied = false

# Rate limiting configuration (optional)
rate_limit = { max_requests = 30, window_secs = 60 }
"#;

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_update_interval() -> u64 {
    1
}

pub fn default_cache_ttl() -> u64 {
    3600 // 1 hour in seconds
}

pub fn default_task_interval() -> u64 {
    1800 // 30 minutes in seconds
}

pub fn default_finder_key() -> String {
    crate::discovery::constants::DEFAULT_FINDER_KEY.to_string()
}
