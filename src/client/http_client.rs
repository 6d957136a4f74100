//! HTTP client construction policy for service calls.
//!
//! Timeouts, user-agent and compression are set here once so every operation
//! shares the same transport behaviour. Requests are never retried.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::OpenAlexConfig;

use super::ServiceError;

/// User-Agent sent with every request. The polite-pool contact travels as a
/// query parameter, never in this header.
#[must_use]
pub fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("openalex-tools/{version} (research-matching-tool)")
}

/// Builds the shared HTTP client from configuration.
///
/// # Errors
///
/// Returns [`ServiceError::ClientBuild`] when reqwest rejects the settings.
pub fn build_http_client(config: &OpenAlexConfig) -> Result<Client, ServiceError> {
    debug!(
        connect_timeout_secs = config.connect_timeout_secs,
        read_timeout_secs = config.read_timeout_secs,
        "Building OpenAlex HTTP client"
    );
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .user_agent(default_user_agent())
        .gzip(true)
        .build()
        .map_err(ServiceError::ClientBuild)
}

/// Validates the configured base URL and strips any trailing slash.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidBaseUrl`] for unparsable or non-http(s) URLs.
pub fn normalize_base_url(base_url: &str) -> Result<String, ServiceError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|error| ServiceError::invalid_base_url(base_url, error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ServiceError::invalid_base_url(
            base_url,
            "scheme must be http or https",
        ));
    }
    Ok(trimmed.to_string())
}
