//! HTTP-backed lookup collaborator
//!
//! Issues `GET {base_url}/{route}/{id}` against the catalog/sales service:
//! - 2xx with a JSON body: entity found
//! - 404: entity does not exist
//! - anything else: transport failure

use crate::error::LookupError;
use crate::query::{EntityRef, LookupKind, LookupQuery};
use crate::Lookup;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`HttpLookup`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpLookupConfig {
    /// Service root, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Route under which salespeople are fetched by identifier
    pub salesperson_route: String,
    /// Route under which products are fetched by SKU
    pub product_route: String,
    /// Per-request deadline enforced by the HTTP client
    pub request_timeout_ms: u64,
}

impl HttpLookupConfig {
    /// Create default configuration for the given service root
    #[inline]
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Route used for a kind
    #[inline]
    #[must_use]
    pub fn route(&self, kind: LookupKind) -> &str {
        match kind {
            LookupKind::Salesperson => &self.salesperson_route,
            LookupKind::Product => &self.product_route,
        }
    }
}

impl Default for HttpLookupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            salesperson_route: "vendedores".to_string(),
            product_route: "productos/sku".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Lookup collaborator talking to the remote service
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: Client,
    base_url: Url,
    config: HttpLookupConfig,
}

impl HttpLookup {
    /// Build collaborator from configuration
    ///
    /// # Errors
    /// Returns `LookupError::Config` if the base URL is unusable or the
    /// client cannot be built
    pub fn new(config: HttpLookupConfig) -> Result<Self, LookupError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| LookupError::Config(format!("invalid base url '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::Config(format!(
                "base url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpLookupConfig {
        &self.config
    }

    /// URL fetched for a query, with the identifier percent-encoded as one segment
    ///
    /// # Errors
    /// Returns `LookupError::Config` if the base URL cannot carry a path
    pub fn url_for(&self, query: &LookupQuery) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| LookupError::Config("base url cannot carry a path".to_string()))?;
            segments.pop_if_empty();
            segments.extend(
                self.config
                    .route(query.kind())
                    .split('/')
                    .filter(|s| !s.is_empty()),
            );
            segments.push(query.id());
        }
        Ok(url)
    }
}

#[async_trait]
impl Lookup for HttpLookup {
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError> {
        let url = self.url_for(query)?;
        debug!(%url, kind = %query.kind(), "issuing existence lookup");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout {
                    after_ms: self.config.request_timeout_ms,
                }
            } else {
                LookupError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::EntityNotFound {
                kind: query.kind(),
                id: query.id().to_string(),
            });
        }
        if !status.is_success() {
            return Err(LookupError::Transport(format!("unexpected status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let payload: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| LookupError::Malformed(e.to_string()))?;

        Ok(EntityRef::new(query.kind(), query.id()).with_payload(payload))
    }
}
