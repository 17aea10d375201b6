//! Decoder types and traits
//!
//! Defines the core decoder abstraction.

use crate::error::Result;
use crate::types::JsonValue;

/// Trait for decoding page bodies into items
pub trait PageDecoder: Send + Sync {
    /// Decode a page body into its items
    fn decode(&self, body: &[u8]) -> Result<Vec<JsonValue>>;
}
