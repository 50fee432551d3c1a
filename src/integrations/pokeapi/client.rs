// src/integrations/pokeapi/client.rs
//
// PokeAPI REST client
//
// ARCHITECTURE:
// - Raw HTTP access to the upstream catalog (reqwest)
// - Retry-with-backoff around every request (see retry.rs)
// - Read-through response caches: one slot for the name list, a map
//   keyed by name for details
// - Composition order: the cache wraps the retrying call, so only a
//   response that survived the retry policy is ever cached
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Returns wire DTOs; mapping and validation live in the service layer
// - Cache invalidation is all-or-nothing via clear_caches()

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::PokeApiConfig;
use crate::integrations::pokeapi::dto::{PokeApiDetail, PokeApiNameList};
use crate::integrations::pokeapi::retry;

/// Page size used to fetch the complete name listing in one request
const MAX_POKEMON_COUNT: u32 = 100_000;

/// Failure of a single upstream fetch, before wrapping into [`crate::error::AppError`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (connect failure,
    /// timeout, connection reset)
    #[error("connection error calling {url}: {message}")]
    Connection { url: String, message: String },

    /// The upstream answered with a non-success status
    #[error("upstream returned status {status} for {url}")]
    UpstreamStatus { url: String, status: u16, body: String },

    /// The response body could not be decoded into the expected shape
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Transient failures worth retrying: connection-level errors and
    /// server-side (5xx) statuses. Client errors and decode failures are
    /// permanent for a given request.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Connection { .. } => true,
            FetchError::UpstreamStatus { status, .. } => *status >= 500,
            FetchError::Decode { .. } => false,
        }
    }
}

/// Raw access to the upstream PokeAPI catalog.
///
/// Implementations own transport concerns (timeouts, retries, caching);
/// callers receive wire DTOs or a [`FetchError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokeApiClient: Send + Sync {
    /// Fetch the complete name listing (cached after the first success)
    async fn fetch_name_list(&self) -> Result<PokeApiNameList, FetchError>;

    /// Fetch the detail document for one Pokemon (cached per name)
    async fn fetch_detail(&self, name: &str) -> Result<PokeApiDetail, FetchError>;

    /// Unconditionally discard all cached responses
    fn clear_caches(&self);
}

/// reqwest-backed [`PokeApiClient`] with retry and read-through caching
pub struct HttpPokeApiClient {
    base_url: String,
    http: reqwest::Client,
    retry: retry::RetryPolicy,
    name_list_cache: RwLock<Option<PokeApiNameList>>,
    detail_cache: RwLock<HashMap<String, PokeApiDetail>>,
}

impl HttpPokeApiClient {
    /// Create a new client from configuration
    pub fn new(config: &PokeApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.clone(),
            http,
            retry: config.retry.clone(),
            name_list_cache: RwLock::new(None),
            detail_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Single GET returning a decoded JSON body
    async fn get_json<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).send().await.map_err(|e| {
            FetchError::Connection {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(FetchError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PokeApiClient for HttpPokeApiClient {
    async fn fetch_name_list(&self) -> Result<PokeApiNameList, FetchError> {
        if let Some(cached) = self.name_list_cache.read().unwrap().clone() {
            return Ok(cached);
        }

        let url = format!(
            "{}/pokemon?limit={}&offset=0",
            self.base_url, MAX_POKEMON_COUNT
        );
        let response = retry::execute(&self.retry, || self.get_json::<PokeApiNameList>(&url)).await?;

        *self.name_list_cache.write().unwrap() = Some(response.clone());
        Ok(response)
    }

    async fn fetch_detail(&self, name: &str) -> Result<PokeApiDetail, FetchError> {
        if let Some(cached) = self.detail_cache.read().unwrap().get(name).cloned() {
            return Ok(cached);
        }

        let url = format!("{}/pokemon/{}", self.base_url, name);
        let response = retry::execute(&self.retry, || self.get_json::<PokeApiDetail>(&url)).await?;

        self.detail_cache
            .write()
            .unwrap()
            .insert(name.to_string(), response.clone());
        Ok(response)
    }

    fn clear_caches(&self) {
        log::info!("clear caches");
        *self.name_list_cache.write().unwrap() = None;
        self.detail_cache.write().unwrap().clear();
    }
}
