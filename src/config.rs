//! Endpoint configuration and the client registry
//!
//! A [`ClientRegistry`] maps client names to their [`EndpointConfig`]: the
//! base URL, the API key and the header it travels under, optional per-client
//! retry/concurrency defaults, and an optional rate limit. Registries are
//! built programmatically or loaded from YAML, and are immutable once handed
//! to a client.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

// ============================================================================
// Endpoint Config
// ============================================================================

/// Configuration for one named API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL all request paths are joined onto
    pub base_url: String,

    /// API key sent with every request
    pub api_key: String,

    /// Header the API key travels under
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Per-client defaults for retry and concurrency knobs
    #[serde(default)]
    pub defaults: CallDefaults,

    /// Optional token-bucket rate limit applied to every request
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_api_key_header() -> String {
    "X-API-KEY".to_string()
}

impl EndpointConfig {
    /// Create a config with the default credential header
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_key_header: default_api_key_header(),
            defaults: CallDefaults::default(),
            rate_limit: None,
        }
    }

    /// Set the header the API key travels under
    #[must_use]
    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    /// Set per-client option defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: CallDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set a rate limit for this client
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Validate the config for the named client
    fn validate(&self, name: &str) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config(format!(
                "Client '{name}' base_url cannot be empty"
            )));
        }
        Url::parse(&self.base_url)?;
        if self.api_key_header.is_empty() {
            return Err(Error::config(format!(
                "Client '{name}' api_key_header cannot be empty"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Per-Client Option Defaults
// ============================================================================

/// Per-client defaults for the retry and concurrency knobs
///
/// These sit between per-call options and the hardcoded defaults: a knob left
/// unset on a call falls back to the value here, and a knob left unset here
/// falls back to the crate default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDefaults {
    /// Whether transient errors are retried
    #[serde(default)]
    pub retry_enabled: Option<bool>,

    /// Total attempts per request, first send included
    #[serde(default)]
    pub retry_max_attempts: Option<u32>,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default)]
    pub retry_interval_ms: Option<u64>,

    /// Concurrent page fetches allowed in an all-pages call
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

// ============================================================================
// Client Registry
// ============================================================================

/// Named endpoint configurations, resolved per call by client name
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, EndpointConfig>,
}

/// Top-level document shape for YAML registries
#[derive(Debug, Deserialize)]
struct RegistryDocument {
    clients: HashMap<String, EndpointConfig>,
}

impl ClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client to the registry
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, config: EndpointConfig) -> Self {
        self.clients.insert(name.into(), config);
        self
    }

    /// Look up a client by name
    pub fn resolve(&self, name: &str) -> Result<&EndpointConfig> {
        self.clients
            .get(name)
            .ok_or_else(|| Error::unknown_client(name))
    }

    /// Check whether a client is registered
    pub fn contains(&self, name: &str) -> bool {
        self.clients.contains_key(name)
    }

    /// Iterate over registered clients
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EndpointConfig)> {
        self.clients.iter()
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Load a registry from a YAML document
    ///
    /// The document carries a `clients` map of name to endpoint config:
    ///
    /// ```yaml
    /// clients:
    ///   billing:
    ///     base_url: https://api.example.com/v2
    ///     api_key: sk_live_xxx
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: RegistryDocument = serde_yaml::from_str(yaml)?;
        for (name, config) in &document.clients {
            config.validate(name)?;
        }
        Ok(Self {
            clients: document.clients,
        })
    }

    /// Load a registry from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read registry file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }
}
