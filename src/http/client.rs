//! API client and single-request execution
//!
//! [`ApiClient`] owns the client registry, a transport, and a page decoder.
//! Its `request` path builds one immutable request, then sends, classifies,
//! and retries transient outcomes sequentially on a fixed interval. Retries
//! re-send the identical request; nothing is rebuilt between attempts.

use super::classify::classify;
use super::rate_limit::RateLimiter;
use super::request::{build_request, OutboundRequest};
use super::transport::{ApiResponse, HttpTransport, Transport};
use crate::config::ClientRegistry;
use crate::decode::{JsonPageDecoder, PageDecoder};
use crate::error::Result;
use crate::options::{CallOptions, ResolvedCallOptions};
use crate::types::{JsonValue, Method, StringMap};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for a remote paginated API
pub struct ApiClient {
    registry: ClientRegistry,
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn PageDecoder>,
    limiters: HashMap<String, RateLimiter>,
}

impl ApiClient {
    /// Create a client over the production HTTP transport
    pub fn new(registry: ClientRegistry) -> Self {
        Self::with_transport(registry, Arc::new(HttpTransport::new()))
    }

    /// Create a client over a custom transport
    pub fn with_transport(registry: ClientRegistry, transport: Arc<dyn Transport>) -> Self {
        let limiters = registry
            .iter()
            .filter_map(|(name, config)| {
                config
                    .rate_limit
                    .as_ref()
                    .map(|limit| (name.clone(), RateLimiter::new(limit)))
            })
            .collect();

        Self {
            registry,
            transport,
            decoder: Arc::new(JsonPageDecoder::new()),
            limiters,
        }
    }

    /// Replace the page decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn PageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// The registry this client resolves names against
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Make a GET request
    pub async fn get(&self, client: &str, path: &str, query: &StringMap) -> Result<ApiResponse> {
        self.request(client, Method::GET, path, query, &CallOptions::default())
            .await
    }

    /// Make a POST request with a body
    pub async fn post(
        &self,
        client: &str,
        path: &str,
        body: impl Into<String>,
    ) -> Result<ApiResponse> {
        self.request(
            client,
            Method::POST,
            path,
            &StringMap::new(),
            &CallOptions::new().body(body),
        )
        .await
    }

    /// Make a single request
    ///
    /// Resolves options against the named client's defaults, builds the
    /// request, and executes it under the retry policy. The page option is
    /// not consulted here; see [`ApiClient::fetch_paginated`].
    pub async fn request(
        &self,
        client: &str,
        method: Method,
        path: &str,
        query: &StringMap,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        let config = self.registry.resolve(client)?;
        let resolved = ResolvedCallOptions::resolve(options, &config.defaults);
        let request = build_request(config, method, path, query, &resolved)?;
        self.execute(client, &request, &resolved).await
    }

    /// Resolve per-call options against the named client's defaults
    pub(crate) fn resolve_options(
        &self,
        client: &str,
        options: &CallOptions,
    ) -> Result<ResolvedCallOptions> {
        let config = self.registry.resolve(client)?;
        Ok(ResolvedCallOptions::resolve(options, &config.defaults))
    }

    /// Send one request, classifying and retrying per the resolved options
    ///
    /// At most `retry_max_attempts` total attempts, the first send included.
    /// Only retryable classifications consume the budget; everything else
    /// returns on the spot, and exhaustion returns the last error unwrapped.
    pub(crate) async fn execute(
        &self,
        client: &str,
        request: &OutboundRequest,
        options: &ResolvedCallOptions,
    ) -> Result<ApiResponse> {
        let max_attempts = options.retry_max_attempts.max(1);
        let mut attempt = 1;

        loop {
            if let Some(limiter) = self.limiters.get(client) {
                limiter.wait().await;
            }

            let outcome = self.transport.send(request).await;
            match classify(outcome, options.skip_error_handling) {
                Ok(response) => {
                    debug!(
                        "Request succeeded: {} {} ({})",
                        request.method, request.url, response.status
                    );
                    return Ok(response);
                }
                Err(err) => {
                    if options.retry_enabled && err.is_retryable() && attempt < max_attempts {
                        warn!(
                            "Request failed ({err}), attempt {attempt}/{max_attempts}, retrying in {:?}",
                            options.retry_interval
                        );
                        tokio::time::sleep(options.retry_interval).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Decode a page body into its items
    pub(crate) fn decode_page(&self, response: &ApiResponse) -> Result<Vec<JsonValue>> {
        self.decoder.decode(&response.body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("registry", &self.registry)
            .field("rate_limited_clients", &self.limiters.len())
            .finish_non_exhaustive()
    }
}
