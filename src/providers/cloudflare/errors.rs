// 3rd party crates
use thiserror::Error;

/// Custom error type for Cloudflare operations.
#[derive(Debug, Error)]
pub enum CloudflareError {
    #[error("Invalid API token for zone '{0}'")]
    InvalidApiToken(String),

    #[error("HTTP client error: {0}")]
    HttpClientBuild(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to create {kind} record '{record}' in zone '{zone}': {message}")]
    CreateFailed {
        zone: String,
        record: String,
        kind: String,
        message: String,
    },

    #[error("Failed to update DNS records for zone '{zone}': {message}")]
    UpdateFailed { zone: String, message: String },

    #[error("Failed to fetch DNS records for zone '{zone}': {message}")]
    FetchFailed { zone: String, message: String },

    #[error("Rate limit exceeded for zone '{0}'")]
    RateLimited(String),

    #[error("Request timed out for zone '{zone}': {message}")]
    Timeout { zone: String, message: String },

    #[error("Zone '{0}' is not active (status: {1})")]
    InactiveZone(String, String),
}

#[derive(Debug, Error)]
pub enum CloudflareValidationError {
    #[error("Cloudflare zone_id is not set")]
    MissingZoneId,
    #[error("Cloudflare api_token is not set")]
    MissingApiToken,
    #[error("Cloudflare zone name is not set")]
    MissingName,
    #[error("Invalid rate limit configuration: {0}")]
    InvalidRateLimit(String),
}
