// 3rd party crates
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{header, Client, StatusCode};
use serde_json::json;
use tracing::{debug, error, info, warn};

// Current module imports
use super::constants::{CLOUDFLARE_API_BASE, FETCH_TIMEOUT_SECS};
use super::errors::CloudflareError;
use super::types::{CfConfig, Cloudflare, DnsResponse, RecordKind, ZoneResponse};

/// Creates a reqwest client with the appropriate headers for Cloudflare API.
pub(super) fn create_reqwest_client(config: &CfConfig) -> Result<Client, CloudflareError> {
    if config.api_token.is_empty() || config.api_token == "your_api_token" {
        error!(
            zone = %config.name,
            "API token is not set or invalid for '{}'",
            config.name
        );
        return Err(CloudflareError::InvalidApiToken(config.name.clone()));
    }

    // Mark security-sensitive headers with `set_sensitive`.
    let mut headers: HeaderMap = HeaderMap::new();
    let bearer_token: String = format!("Bearer {}", &config.api_token);
    let mut auth_value: HeaderValue = HeaderValue::from_str(&bearer_token).map_err(|e| {
        error!(zone = %config.name, "Invalid API token format: {}", e);
        CloudflareError::InvalidHeaderValue(e)
    })?;
    auth_value.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth_value);

    let client: Client = Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| {
            error!(zone = %config.name, "Failed to build HTTP client: {}", e);
            CloudflareError::HttpClientBuild(e)
        })?;

    Ok(client)
}

/// Verifies that the zone is active.
pub(super) async fn verify_zone_status(
    cloudflare: &Cloudflare,
) -> Result<ZoneResponse, CloudflareError> {
    let url = format!("{}/zones/{}", CLOUDFLARE_API_BASE, cloudflare.config.zone_id);

    let response =
        cloudflare
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CloudflareError::FetchFailed {
                zone: cloudflare.config.name.clone(),
                message: format!("Failed to fetch zone status: {}", e),
            })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(CloudflareError::InvalidApiToken(
            cloudflare.config.name.clone(),
        ));
    }

    if !status.is_success() {
        return Err(CloudflareError::FetchFailed {
            zone: cloudflare.config.name.clone(),
            message: format!("HTTP {}", status),
        });
    }

    response
        .json::<ZoneResponse>()
        .await
        .map_err(|e| CloudflareError::FetchFailed {
            zone: cloudflare.config.name.clone(),
            message: format!("Failed to parse zone response: {}", e),
        })
}

/// Fetches the records of one kind published under a record name.
pub(super) async fn fetch_records(
    cloudflare: &Cloudflare,
    record: &str,
    kind: RecordKind,
) -> Result<DnsResponse, CloudflareError> {
    let url = format!(
        "{}/zones/{}/dns_records?type={}&name={}",
        CLOUDFLARE_API_BASE, cloudflare.config.zone_id, kind, record
    );

    debug!(
        zone = %cloudflare.config.name,
        record = %record,
        url = %url,
        "Sending DNS records request"
    );

    let response = tokio::time::timeout(
        tokio::time::Duration::from_secs(FETCH_TIMEOUT_SECS),
        cloudflare.client.get(&url).send(),
    )
    .await
    .map_err(|_| CloudflareError::Timeout {
        zone: cloudflare.config.name.clone(),
        message: "DNS record fetch request timed out".to_string(),
    })?
    .map_err(|e| CloudflareError::FetchFailed {
        zone: cloudflare.config.name.clone(),
        message: format!("Failed to send fetch request: {}", e),
    })?;

    let status = response.status();
    match status {
        StatusCode::OK => {
            response
                .json::<DnsResponse>()
                .await
                .map_err(|e| CloudflareError::FetchFailed {
                    zone: cloudflare.config.name.clone(),
                    message: format!("Failed to parse response: {}", e),
                })
        }
        StatusCode::UNAUTHORIZED => Err(CloudflareError::InvalidApiToken(
            cloudflare.config.name.clone(),
        )),
        StatusCode::NOT_FOUND => Err(CloudflareError::FetchFailed {
            zone: cloudflare.config.name.clone(),
            message: format!("Zone or DNS record not found for {}", record),
        }),
        StatusCode::TOO_MANY_REQUESTS => {
            Err(CloudflareError::RateLimited(cloudflare.config.name.clone()))
        }
        _ => {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CloudflareError::FetchFailed {
                zone: cloudflare.config.name.clone(),
                message: format!("HTTP {} - {}", status, error_body),
            })
        }
    }
}

/// Creates a new DNS record.
pub(super) async fn create_record(
    cloudflare: &Cloudflare,
    record: &str,
    kind: RecordKind,
    content: &str,
) -> Result<(), CloudflareError> {
    info!(
        zone = %cloudflare.config.name,
        record = %record,
        "Creating new {} record with value {}",
        kind,
        content
    );

    let url = format!(
        "{}/zones/{}/dns_records",
        CLOUDFLARE_API_BASE, cloudflare.config.zone_id
    );

    let response = cloudflare
        .client
        .post(&url)
        .json(&json!({
            "type": kind.as_str(),
            "name": record,
            "content": content,
            "proxied": cloudflare.config.proxied,
            "ttl": 1, // Auto TTL
        }))
        .send()
        .await
        .map_err(|e| CloudflareError::CreateFailed {
            zone: cloudflare.config.name.clone(),
            record: record.to_string(),
            kind: kind.to_string(),
            message: format!("Failed to send create request: {}", e),
        })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(CloudflareError::InvalidApiToken(
            cloudflare.config.name.clone(),
        ));
    }

    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(CloudflareError::CreateFailed {
            zone: cloudflare.config.name.clone(),
            record: record.to_string(),
            kind: kind.to_string(),
            message: format!("HTTP {} - {}", status, error_body),
        });
    }

    info!(
        zone = %cloudflare.config.name,
        record = %record,
        "Successfully created {} record",
        kind
    );
    Ok(())
}

/// Updates a specific DNS record with a new value.
pub(super) async fn update_record(
    cloudflare: &Cloudflare,
    record_id: &str,
    content: &str,
) -> Result<(), CloudflareError> {
    let url = format!(
        "{}/zones/{}/dns_records/{}",
        CLOUDFLARE_API_BASE, cloudflare.config.zone_id, record_id
    );

    let response = cloudflare
        .client
        .patch(&url)
        .json(&json!({
            "content": content,
            "proxied": cloudflare.config.proxied,
        }))
        .send()
        .await
        .map_err(|e| CloudflareError::UpdateFailed {
            zone: cloudflare.config.name.clone(),
            message: format!("Failed to send update request: {}", e),
        })?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(CloudflareError::InvalidApiToken(
            cloudflare.config.name.clone(),
        ));
    }

    if !status.is_success() {
        return Err(CloudflareError::UpdateFailed {
            zone: cloudflare.config.name.clone(),
            message: format!("HTTP {}", status),
        });
    }

    Ok(())
}

/// Makes one kind of record under a name carry the given value: missing →
/// create, different → update, equal → no-op. Every API call runs under the
/// zone's rate limit.
pub(super) async fn ensure_record(
    cloudflare: &Cloudflare,
    record: &str,
    kind: RecordKind,
    content: &str,
) -> Result<(), CloudflareError> {
    let records = cloudflare
        .with_rate_limit(fetch_records(cloudflare, record, kind))
        .await?;

    if records.result.is_empty() {
        warn!(
            zone = %cloudflare.config.name,
            record = %record,
            "No {} record found, attempting to create",
            kind
        );
        return cloudflare
            .with_rate_limit(create_record(cloudflare, record, kind, content))
            .await;
    }

    for existing in records.result {
        if existing.content != content {
            info!(
                zone = %cloudflare.config.name,
                record = %record,
                "Updating {} record from {} to {}",
                kind,
                existing.content,
                content
            );
            cloudflare
                .with_rate_limit(update_record(cloudflare, &existing.id, content))
                .await?;
        } else {
            debug!(
                zone = %cloudflare.config.name,
                record = %record,
                "{} record already set to {}",
                kind,
                content
            );
        }
    }

    Ok(())
}
