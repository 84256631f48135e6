// cas-net/src/http.rs
//! Request plumbing shared by the async and blocking clients.
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use cas_common::config::Config;
use cas_common::error::{CasError, Result};

use crate::validation::validate_base_url;

pub const API_KEY_HEADER: &str = "X-API-KEY";
pub const DETAIL_ENDPOINT: &str = "detail";
pub const SEARCH_ENDPOINT: &str = "search";
const USER_AGENT_STRING: &str = concat!(
    "cas-client/",
    env!("CARGO_PKG_VERSION"),
    " (Rust; +https://commonchemistry.cas.org)"
);

pub(crate) type QueryParams = Vec<(&'static str, String)>;

pub(crate) fn default_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut key = HeaderValue::from_str(&config.api_key).map_err(|e| {
        error!("API key is not a valid header value: {}", e);
        CasError::Config("API key contains characters not allowed in an HTTP header".to_string())
    })?;
    key.set_sensitive(true);
    headers.insert(HeaderName::from_static("x-api-key"), key);
    Ok(headers)
}

/// Checks the base URL and builds the default headers for a client.
pub(crate) fn prepare(config: &Config) -> Result<HeaderMap> {
    validate_base_url(&config.base_url)?;
    default_headers(config)
}

pub(crate) fn detail_params(cas_rn: &str) -> QueryParams {
    vec![("cas_rn", cas_rn.to_string())]
}

/// `offset` and `size` are only sent when set and non-zero.
pub(crate) fn search_params(query: &str, offset: Option<u32>, size: Option<u32>) -> QueryParams {
    let mut params = vec![("q", query.to_string())];
    if let Some(offset) = offset.filter(|o| *o != 0) {
        params.push(("offset", offset.to_string()));
    }
    if let Some(size) = size.filter(|s| *s != 0) {
        params.push(("size", size.to_string()));
    }
    params
}

pub(crate) fn transport_error(url: &str, e: reqwest::Error) -> CasError {
    error!("HTTP request failed for {}: {}", url, e);
    CasError::from(e)
}

/// Turns a finished response into JSON, or an [`CasError::HttpStatus`].
pub(crate) fn decode_body(status: StatusCode, url: &str, body: &str) -> Result<Value> {
    debug!("Received HTTP status: {} for {}", status, url);
    if !status.is_success() {
        debug!("Response body for failed request to {}: {}", url, body);
        return Err(CasError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse JSON response from {}: {}", url, e);
        CasError::from(e)
    })
}
