//! Error types for pagewise
//!
//! This module defines the error taxonomy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Remote API failures map onto a fixed set of status-based variants, each
//! carrying the response body text. Transport failures (connection refused,
//! timeout, TLS) stay in their own variant and are never folded into the
//! status-based set.

use thiserror::Error;

/// The main error type for pagewise
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A client name with no entry in the registry
    #[error("Unknown client: {name}")]
    UnknownClient {
        /// The unresolved client name
        name: String,
    },

    /// A base URL or request URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A YAML registry document failed to parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A JSON value failed to parse
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Errors (status-mapped)
    // ============================================================================
    /// The API answered 400
    #[error("Bad request (400): {body}")]
    BadRequest {
        /// Response body text
        body: String,
    },

    /// The API answered 403; treated as transient and retried
    #[error("Unauthenticated (403): {body}")]
    Unauthenticated {
        /// Response body text
        body: String,
    },

    /// The API answered 404
    #[error("Not found (404): {body}")]
    NotFound {
        /// Response body text
        body: String,
    },

    /// The API answered 418
    #[error("IP banned (418): {body}")]
    IpBanned {
        /// Response body text
        body: String,
    },

    /// The API answered 429; transient, retried
    #[error("Usage limit reached (429): {body}")]
    UsageLimitReached {
        /// Response body text
        body: String,
    },

    /// The API answered 500; transient, retried
    #[error("Internal server error (500): {body}")]
    InternalServerError {
        /// Response body text
        body: String,
    },

    /// The API answered with a status outside the documented set
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// The status code received
        status: u16,
        /// Response body text
        body: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The exchange itself failed: connection, timeout, TLS
    #[error("Transport error: {message}")]
    Transport {
        /// The transport's failure reason, unmodified
        message: String,
    },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    /// A page body could not be decoded into items
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown-client error
    pub fn unknown_client(name: impl Into<String>) -> Self {
        Self::UnknownClient { name: name.into() }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Exactly three API outcomes are considered transient: 403 (the remote
    /// authentication layer intermittently rejects valid keys), 429, and 500.
    /// Everything else, transport failures included, is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Unauthenticated { .. }
                | Error::UsageLimitReached { .. }
                | Error::InternalServerError { .. }
        )
    }

    /// The HTTP status behind this error, if it came from a status mapping
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { .. } => Some(400),
            Error::Unauthenticated { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::IpBanned { .. } => Some(418),
            Error::UsageLimitReached { .. } => Some(429),
            Error::InternalServerError { .. } => Some(500),
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for pagewise
pub type Result<T> = std::result::Result<T, Error>;
