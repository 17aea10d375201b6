//! Outbound request construction
//!
//! Pure assembly of endpoint config, path, query, and call options into a
//! request a transport can send. No I/O happens here; identical inputs
//! always produce an identical request, so a retry can re-send the same
//! [`OutboundRequest`] untouched.

use crate::config::EndpointConfig;
use crate::error::Result;
use crate::options::ResolvedCallOptions;
use crate::types::{Method, StringMap};
use url::Url;

/// A fully-formed request, ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method
    pub method: Method,
    /// Fully-qualified URL, query included
    pub url: Url,
    /// Header map, credential header included
    pub headers: StringMap,
    /// Request body; empty string when the call carries none
    pub body: String,
}

/// Build an outbound request for one call
///
/// The URL is the config's base URL with `path` appended and the query map
/// encoded onto it (pairs sorted by key, any query already on the base
/// replaced). Headers carry the API key under the configured header name,
/// the content type, the crate user agent, and an explicit content length
/// when the options ask for one.
pub fn build_request(
    config: &EndpointConfig,
    method: Method,
    path: &str,
    query: &StringMap,
    options: &ResolvedCallOptions,
) -> Result<OutboundRequest> {
    let url = build_url(&config.base_url, path, query)?;

    let mut headers = StringMap::new();
    headers.insert(config.api_key_header.clone(), config.api_key.clone());
    headers.insert("content-type".to_string(), options.content_type.clone());
    headers.insert(
        "user-agent".to_string(),
        format!("{}/{}", crate::NAME, crate::VERSION),
    );
    if let Some(length) = options.content_length {
        headers.insert("content-length".to_string(), length.to_string());
    }

    Ok(OutboundRequest {
        method,
        url,
        headers,
        body: options.body.clone().unwrap_or_default(),
    })
}

/// Join base URL and path, then encode the query deterministically
fn build_url(base_url: &str, path: &str, query: &StringMap) -> Result<Url> {
    let mut url = Url::parse(base_url)?;

    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_query(None);

    if !query.is_empty() {
        let mut pairs: Vec<(&String, &String)> = query.iter().collect();
        pairs.sort_by_key(|(key, _)| key.as_str());

        let mut serializer = url.query_pairs_mut();
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
    }

    Ok(url)
}
