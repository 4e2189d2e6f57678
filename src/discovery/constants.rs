/// Default JSON pointer for the address field of an IP-echo response.
pub const DEFAULT_FINDER_KEY: &str = "/ip";

/// Timeout for one IP-echo request.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
