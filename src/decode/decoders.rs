//! Decoder implementations

use super::types::PageDecoder;
use crate::error::{Error, Result};
use crate::types::JsonValue;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
///
/// Without a path, a top-level array is the item list and any other value is
/// treated as a single item. With a path, items come from the value under the
/// dot-notation path (e.g. `data.items`); a missing path yields no items.
#[derive(Debug, Clone, Default)]
pub struct JsonPageDecoder {
    /// Dot-notation path to the items within an envelope
    record_path: Option<String>,
}

impl JsonPageDecoder {
    /// Create a decoder for bare JSON sequences
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that extracts items from under a path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract items from a parsed page body
    fn extract_items(&self, value: JsonValue) -> Vec<JsonValue> {
        match &self.record_path {
            Some(path) => match extract_simple_path(&value, path) {
                Some(JsonValue::Array(items)) => items,
                Some(item) => vec![item],
                None => vec![],
            },
            None => match value {
                JsonValue::Array(items) => items,
                item => vec![item],
            },
        }
    }
}

impl PageDecoder for JsonPageDecoder {
    fn decode(&self, body: &[u8]) -> Result<Vec<JsonValue>> {
        let value: JsonValue = serde_json::from_slice(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        Ok(self.extract_items(value))
    }
}

/// Walk a dot-notation path through nested objects
fn extract_simple_path(value: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            JsonValue::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current.clone())
}
