// src/integrations/http.rs
//
// Shared HTTP client construction for all catalog integrations

use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

const USER_AGENT: &str = concat!("mangashelf/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client used by every catalog.
/// The resolver adds no timeout of its own; this one applies to every call.
pub fn build_http_client(config: &HttpConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(AppError::from)
}

/// Turn a non-2xx response into an HTTP error, logging which catalog sent it
pub(crate) fn ensure_success(
    catalog: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    let status = response.status();
    response.error_for_status().map_err(|e| {
        log::warn!("{} API returned status: {}", catalog, status);
        AppError::from(e)
    })
}
