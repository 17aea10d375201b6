// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! # pagewise
//!
//! A client library for remote paginated HTTP APIs: authenticated request
//! construction, typed response classification, transient-error retries, and
//! concurrent all-pages fetching with deterministic ordering.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::{ApiClient, CallOptions, ClientRegistry, Method, Result, StringMap};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let registry = ClientRegistry::from_file("clients.yaml")?;
//!     let client = ApiClient::new(registry);
//!
//!     // One request, classified and retried per the default policy
//!     let response = client.get("billing", "/invoices", &StringMap::new()).await?;
//!
//!     // Every page, fetched concurrently, collapsed in page order
//!     let items = client
//!         .fetch_all(
//!             "billing",
//!             Method::GET,
//!             "/invoices",
//!             &StringMap::new(),
//!             &CallOptions::new().max_concurrency(5),
//!         )
//!         .await?;
//!     println!("{} invoices", items.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   │
//!   ▼
//! ┌─────────────────┐   ┌──────────────────┐   ┌────────────────────┐
//! │ Request Builder │──▶│ Executor         │──▶│ Classifier         │
//! │ config+options  │   │ send, retry loop │   │ status → outcome   │
//! │ → OutboundReq   │   │ (rate limited)   │   │                    │
//! └─────────────────┘   └──────────────────┘   └────────────────────┘
//!                               ▲
//!                               │ concurrent page fetches,
//!                               │ bounded, joined per batch
//!                       ┌──────────────────┐
//!                       │ Pagination       │
//!                       │ orchestrator     │──▶ items in page order,
//!                       └──────────────────┘    or lowest-page error
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and result alias
pub mod error;

/// Common types and type aliases
pub mod types;

/// Endpoint configuration and the client registry
pub mod config;

/// Per-call options and layered resolution
pub mod options;

/// Page body decoding
pub mod decode;

/// Request construction, classification, and execution
pub mod http;

/// Concurrent page fetching and collapse
pub mod pagination;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{CallDefaults, ClientRegistry, EndpointConfig};
pub use decode::{JsonPageDecoder, PageDecoder};
pub use error::{Error, Result};
pub use http::{ApiClient, ApiResponse, HttpTransport, OutboundRequest, RateLimiterConfig, Transport};
pub use options::{CallOptions, ResolvedCallOptions};
pub use pagination::{Page, Paginated, PAGE_SIZE};
pub use types::{JsonValue, Method, StringMap};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
