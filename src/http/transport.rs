//! Transport abstraction
//!
//! A [`Transport`] sends one fully-formed request and hands back the raw
//! response: status, headers, body bytes. Nothing here inspects the status,
//! so the production [`HttpTransport`] and scripted test transports are
//! interchangeable behind the trait object.

use super::request::OutboundRequest;
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// Default request timeout for the production transport
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Response
// ============================================================================

/// A raw response as received from the wire
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: StringMap,
    /// Response body
    pub body: Bytes,
}

impl ApiResponse {
    /// The body as text, lossily decoded
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<JsonValue> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends a fully-formed request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    ///
    /// A returned error means the exchange itself failed (connection,
    /// timeout, TLS); any received response is an `Ok`, whatever its status.
    async fn send(&self, request: &OutboundRequest) -> Result<ApiResponse>;
}

// ============================================================================
// Production Transport
// ============================================================================

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<ApiResponse> {
        let mut req = self.client.request(request.method.into(), request.url.clone());

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.body.is_empty() {
            req = req.body(request.body.clone());
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
