// cas-net/src/api.rs
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use cas_common::config::Config;
use cas_common::error::{CasError, Result};
use cas_common::model::{Chemical, SearchResults};
use cas_common::process::{chemical_from_value, search_results_from_value};

use crate::http::{
    decode_body, detail_params, prepare, search_params, transport_error, QueryParams,
    DETAIL_ENDPOINT, SEARCH_ENDPOINT,
};

/// Async client for the Common Chemistry API.
///
/// Each call is a single GET with the configured timeout. Nothing is retried
/// or cached.
#[derive(Debug, Clone)]
pub struct CasClient {
    client: Client,
    config: Config,
}

impl CasClient {
    pub fn new(config: Config) -> Result<Self> {
        let headers = prepare(&config)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| CasError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Resolves the API key (explicit > `CAS_API_KEY` > config file) and builds
    /// a client. Fails here, not on the first request, when no key is found.
    pub fn from_env(explicit_api_key: Option<&str>) -> Result<Self> {
        Self::new(Config::load(explicit_api_key)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches the full record for a registry number.
    pub async fn fetch_chemical(&self, cas_rn: &str) -> Result<Chemical> {
        debug!("Fetching chemical detail for '{}'", cas_rn);
        let value = self.get_json(DETAIL_ENDPOINT, detail_params(cas_rn)).await?;
        chemical_from_value(value)
    }

    /// Free text search. The server pages results; `offset` and `size` are
    /// passed through as given.
    pub async fn search(
        &self,
        query: &str,
        offset: Option<u32>,
        size: Option<u32>,
    ) -> Result<SearchResults> {
        debug!(
            "Searching for '{}' (offset: {:?}, size: {:?})",
            query, offset, size
        );
        let value = self
            .get_json(SEARCH_ENDPOINT, search_params(query, offset, size))
            .await?;
        let results = search_results_from_value(value)?;
        debug!(
            "Search for '{}' matched {} records, {} returned",
            query,
            results.count,
            results.len()
        );
        Ok(results)
    }

    async fn get_json(&self, part: &str, params: QueryParams) -> Result<Value> {
        let url = self.config.endpoint(part);
        debug!("GET {} with params {:?}", url, params);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&url, e))?;
        decode_body(status, &url, &body)
    }
}

/// Fetches a chemical with configuration resolved from the environment.
pub async fn fetch_chemical(cas_rn: &str) -> Result<Chemical> {
    CasClient::from_env(None)?.fetch_chemical(cas_rn).await
}

/// Searches with configuration resolved from the environment.
pub async fn search(query: &str, offset: Option<u32>, size: Option<u32>) -> Result<SearchResults> {
    CasClient::from_env(None)?.search(query, offset, size).await
}
