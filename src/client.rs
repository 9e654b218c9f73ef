// client.rs
// HTTP client for the remote creature-data API. Responses are cached by
// request signature and identical in-flight requests are deduplicated.

use crate::cache::{CacheTrait, InmemoryCache};
use crate::config::{ApiConfig, CacheConfig};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

// Custom error types for remote request failures
#[derive(Debug)]
pub enum ClientError {
    // Non-2xx response from the remote API
    Http { status: u16 },
    // Transport-level failure, no status available
    Network(String),
    Parse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http { status } => {
                write!(f, "API request failed with status: {}", status)
            }
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::Http {
                status: status.as_u16(),
            },
            None => ClientError::Network(err.to_string()),
        }
    }
}

impl ClientError {
    /// HTTP status of the failed request, when the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Builds the full request URL from base, endpoint path and query parameters.
///
/// Endpoints that are already absolute URLs are passed through untouched
/// (the remote API hands out absolute resource URLs, e.g. evolution chains).
pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, String)]) -> String {
    let mut url = if endpoint.starts_with("http") {
        endpoint.to_string()
    } else {
        format!("{}/{}", base_url, endpoint)
    };

    if !params.is_empty() {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }

    url
}

/// Deterministic memoization key for a request signature.
///
/// The endpoint is concatenated with a canonical JSON encoding of the sorted
/// parameter object, so logically equal requests always share one key.
pub fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let sorted: BTreeMap<&str, &str> = params
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    let encoded = serde_json::to_string(&sorted).unwrap_or_default();
    format!("{}:{}", endpoint, encoded)
}

pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: InmemoryCache<serde_json::Value>,
    // Per-signature locks so concurrent identical requests fetch once
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PokeApiClient {
    pub fn new(api: &ApiConfig, cache: &CacheConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: api.base_url.clone(),
            cache: InmemoryCache::new(cache.clone()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://pokeapi.co/api/v2".to_string(),
            cache: InmemoryCache::with_defaults(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches an endpoint and deserializes the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.get_with_params(endpoint, &[]).await
    }

    /// Fetches an endpoint with query parameters and deserializes the body.
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let value = self.get_json(endpoint, params).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::error!("Failed to decode response from {}: {}", endpoint, e);
            ClientError::Parse(format!("JSON decoding failed: {}", e))
        })
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ClientError> {
        let key = cache_key(endpoint, params);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        // Take the per-signature lock; whoever holds it first performs the
        // fetch and the rest observe the cached result on re-check.
        let entry = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = entry.lock().await;

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let result = self.fetch_json(endpoint, params).await;

        if let Ok(value) = &result {
            if let Err(e) = self.cache.insert(key.clone(), value.clone()) {
                tracing::warn!("Failed to cache response for {}: {}", key, e);
            }
        }

        let mut in_flight = self.in_flight.lock().await;
        in_flight.remove(&key);

        result
    }

    async fn fetch_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ClientError> {
        let url = build_url(&self.base_url, endpoint, params);
        tracing::debug!("Fetching from URL: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            ClientError::from(e)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("API request to {} failed with status: {}", url, status);
            return Err(ClientError::Http { status });
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            ClientError::Parse(format!("JSON parsing failed: {}", e))
        })
    }
}
