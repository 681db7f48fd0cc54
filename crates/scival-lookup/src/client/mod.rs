//! SciVal API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - A document cache (in-process + on-disk) governed by a [`Refresh`] policy

mod cache;
mod refresh;

pub use cache::{CachedDocument, DocumentCache};
pub use refresh::Refresh;

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// API endpoints served by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Endpoint {
    /// SciVal Publication Lookup (`/analytics/scival/publication/{id}`).
    PublicationLookup,
}

impl Endpoint {
    /// Stable name, used as the cache subdirectory.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PublicationLookup => "PublicationLookup",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can produce the JSON document for an identifier.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Return the document for `identifier`, from cache or a live fetch per `refresh`.
    async fn fetch_or_load(
        &self,
        endpoint: Endpoint,
        identifier: &str,
        refresh: Refresh,
    ) -> ClientResult<Value>;
}

/// SciVal API client.
#[derive(Clone)]
pub struct ScivalClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Document cache.
    cache: DocumentCache,

    /// API key (optional until a live fetch is needed).
    api_key: Option<String>,

    /// Institution token (optional).
    inst_token: Option<String>,

    /// Publication Lookup base URL.
    base_url: Url,
}

impl ScivalClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL or a credential header is invalid, or
    /// HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("X-ELS-APIKey", key.parse()?);
        }
        if let Some(ref token) = config.inst_token {
            headers.insert("X-ELS-Insttoken", token.parse()?);
        }

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base URL {} cannot take a path", config.base_url);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = DocumentCache::new(config.cache_dir, config.memory_cache_capacity);

        Ok(Self {
            client,
            cache,
            api_key: config.api_key,
            inst_token: config.inst_token,
            base_url,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The document cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// URL of the document for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL cannot take path segments.
    pub fn document_url(&self, endpoint: Endpoint, identifier: &str) -> ClientResult<Url> {
        let mut url = match endpoint {
            Endpoint::PublicationLookup => self.base_url.clone(),
        };
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(identifier);
        Ok(url)
    }

    /// Fetch a document from the API, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or a non-JSON response.
    pub async fn fetch(&self, endpoint: Endpoint, identifier: &str) -> ClientResult<Value> {
        if self.api_key.is_none() {
            return Err(ClientError::MissingApiKey);
        }

        let url = self.document_url(endpoint, identifier)?;
        tracing::info!(%endpoint, identifier, "Fetching document");

        let response =
            self.client.get(url).query(&[("httpAccept", "application/json")]).send().await?;

        let response = self.handle_response(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(status = status.as_u16(), url = %response.url(), "Request failed");

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            401 | 403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::unauthorized(status.as_u16(), text))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl DocumentSource for ScivalClient {
    async fn fetch_or_load(
        &self,
        endpoint: Endpoint,
        identifier: &str,
        refresh: Refresh,
    ) -> ClientResult<Value> {
        if refresh.allows_cache() {
            match self.cache.load(endpoint, identifier).await {
                Ok(Some(cached)) if !refresh.is_stale(cached.age(Utc::now())) => {
                    return Ok(cached.document);
                }
                Ok(Some(_)) => tracing::debug!(%endpoint, identifier, "Cached document is stale"),
                Ok(None) => {}
                Err(e) => tracing::warn!(%endpoint, identifier, error = %e, "Cache read failed"),
            }
        }

        let document = self.fetch(endpoint, identifier).await?;
        if let Err(e) = self.cache.store(endpoint, identifier, &document).await {
            tracing::warn!(%endpoint, identifier, error = %e, "Cache write failed");
        }
        Ok(document)
    }
}

impl std::fmt::Debug for ScivalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScivalClient")
            .field("has_api_key", &self.has_api_key())
            .field("has_inst_token", &self.inst_token.is_some())
            .field("base_url", &self.base_url.as_str())
            .field("cache", &self.cache)
            .finish()
    }
}
