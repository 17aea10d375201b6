//! HTTP request construction, classification, and execution
//!
//! # Overview
//!
//! Three small pieces make up a single call:
//!
//! - **Request building**: endpoint config + call options become a
//!   fully-formed [`OutboundRequest`] before any I/O happens.
//! - **Classification**: a raw [`ApiResponse`] (or transport failure) is
//!   mapped to a typed outcome by status.
//! - **Execution**: [`ApiClient`] sends through a [`Transport`], classifies,
//!   and retries transient outcomes on a fixed interval, waiting on the
//!   client's rate limiter before each attempt.

mod classify;
mod client;
mod rate_limit;
mod request;
mod transport;

pub use classify::classify;
pub use client::ApiClient;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{build_request, OutboundRequest};
pub use transport::{ApiResponse, HttpTransport, Transport};
