//! Per-call options and their layered resolution
//!
//! Every request accepts a [`CallOptions`]. Knobs left unset fall back to the
//! client's [`CallDefaults`](crate::config::CallDefaults), and from there to
//! the crate defaults, so a call only ever states what it wants to override.
//! Resolution happens once per call, up front, producing a
//! [`ResolvedCallOptions`] that the executor and orchestrator read.

use crate::config::CallDefaults;
use crate::pagination::Page;
use std::time::Duration;

/// Whether transient errors are retried when nothing says otherwise
pub const DEFAULT_RETRY_ENABLED: bool = true;

/// Total attempts per request when nothing says otherwise
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// Fixed delay between attempts when nothing says otherwise
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Concurrent page fetches allowed when nothing says otherwise
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Content type sent when nothing says otherwise
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// Call Options
// ============================================================================

/// Options for a single call
///
/// All knobs are optional; see the module docs for how unset ones resolve.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Whether transient errors are retried
    pub retry_enabled: Option<bool>,
    /// Total attempts per request, first send included
    pub retry_max_attempts: Option<u32>,
    /// Fixed delay between attempts
    pub retry_interval: Option<Duration>,
    /// Concurrent page fetches allowed in an all-pages call
    pub max_concurrency: Option<usize>,
    /// Which page(s) a paginated call targets
    pub page: Page,
    /// Return responses as-is instead of classifying their status
    pub skip_error_handling: bool,
    /// Content type header value
    pub content_type: Option<String>,
    /// Explicit content-length header value
    pub content_length: Option<u64>,
    /// Request body
    pub body: Option<String>,
}

impl CallOptions {
    /// Create options with every knob unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable retries for this call
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        self.retry_enabled = Some(enabled);
        self
    }

    /// Disable retries for this call
    #[must_use]
    pub fn no_retry(self) -> Self {
        self.retry_enabled(false)
    }

    /// Set the total attempts per request
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry_max_attempts = Some(attempts);
        self
    }

    /// Set the fixed delay between attempts
    #[must_use]
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    /// Set the concurrent page fetch cap
    #[must_use]
    pub fn max_concurrency(mut self, concurrency: usize) -> Self {
        self.max_concurrency = Some(concurrency);
        self
    }

    /// Target a single page by number
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Page::Number(page);
        self
    }

    /// Target every page (the default)
    #[must_use]
    pub fn all_pages(mut self) -> Self {
        self.page = Page::All;
        self
    }

    /// Return responses as-is instead of classifying their status
    #[must_use]
    pub fn skip_error_handling(mut self) -> Self {
        self.skip_error_handling = true;
        self
    }

    /// Set the content type header
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set an explicit content-length header
    #[must_use]
    pub fn content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Set the request body
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

// ============================================================================
// Resolved Options
// ============================================================================

/// Call options after layering: call, then client defaults, then crate defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCallOptions {
    /// Whether transient errors are retried
    pub retry_enabled: bool,
    /// Total attempts per request, first send included
    pub retry_max_attempts: u32,
    /// Fixed delay between attempts
    pub retry_interval: Duration,
    /// Concurrent page fetches allowed in an all-pages call
    pub max_concurrency: usize,
    /// Which page(s) a paginated call targets
    pub page: Page,
    /// Return responses as-is instead of classifying their status
    pub skip_error_handling: bool,
    /// Content type header value
    pub content_type: String,
    /// Explicit content-length header value
    pub content_length: Option<u64>,
    /// Request body
    pub body: Option<String>,
}

impl ResolvedCallOptions {
    /// Resolve per-call options against a client's defaults
    pub fn resolve(options: &CallOptions, defaults: &CallDefaults) -> Self {
        Self {
            retry_enabled: options
                .retry_enabled
                .or(defaults.retry_enabled)
                .unwrap_or(DEFAULT_RETRY_ENABLED),
            retry_max_attempts: options
                .retry_max_attempts
                .or(defaults.retry_max_attempts)
                .unwrap_or(DEFAULT_RETRY_MAX_ATTEMPTS),
            retry_interval: options
                .retry_interval
                .or(defaults.retry_interval_ms.map(Duration::from_millis))
                .unwrap_or(DEFAULT_RETRY_INTERVAL),
            // buffer_unordered(0) would never start a fetch
            max_concurrency: options
                .max_concurrency
                .or(defaults.max_concurrency)
                .unwrap_or(DEFAULT_MAX_CONCURRENCY)
                .max(1),
            page: options.page,
            skip_error_handling: options.skip_error_handling,
            content_type: options
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            content_length: options.content_length,
            body: options.body.clone(),
        }
    }
}

impl Default for ResolvedCallOptions {
    fn default() -> Self {
        Self::resolve(&CallOptions::default(), &CallDefaults::default())
    }
}
