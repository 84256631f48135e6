// cas-net/src/blocking.rs
//! Synchronous counterpart of [`crate::api::CasClient`].
//!
//! Must not be used from inside an async runtime; use the async client there.
use reqwest::blocking::Client;
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

    pub fn from_env(explicit_api_key: Option<&str>) -> Result<Self> {
        Self::new(Config::load(explicit_api_key)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetch_chemical(&self, cas_rn: &str) -> Result<Chemical> {
        debug!("Fetching chemical detail for '{}'", cas_rn);
        chemical_from_value(self.get_json(DETAIL_ENDPOINT, detail_params(cas_rn))?)
    }

    pub fn search(
        &self,
        query: &str,
        offset: Option<u32>,
        size: Option<u32>,
    ) -> Result<SearchResults> {
        debug!(
            "Searching for '{}' (offset: {:?}, size: {:?})",
            query, offset, size
        );
        search_results_from_value(self.get_json(SEARCH_ENDPOINT, search_params(query, offset, size))?)
    }

    fn get_json(&self, part: &str, params: QueryParams) -> Result<Value> {
        let url = self.config.endpoint(part);
        debug!("GET {} with params {:?}", url, params);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        let body = response.text().map_err(|e| transport_error(&url, e))?;
        decode_body(status, &url, &body)
    }
}

pub fn fetch_chemical(cas_rn: &str) -> Result<Chemical> {
    CasClient::from_env(None)?.fetch_chemical(cas_rn)
}

pub fn search(query: &str, offset: Option<u32>, size: Option<u32>) -> Result<SearchResults> {
    CasClient::from_env(None)?.search(query, offset, size)
}
