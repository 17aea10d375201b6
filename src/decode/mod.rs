//! Page body decoding
//!
//! # Overview
//!
//! The decode module turns a page body into its items. All-pages fetches
//! lean on it twice: item counts drive the continuation rule, and the items
//! themselves make up the collapsed result. The one shape assumption lives
//! here: a page body parses as a JSON sequence, or as an envelope whose
//! record path yields one.

mod decoders;
mod types;

pub use decoders::JsonPageDecoder;
pub use types::PageDecoder;
