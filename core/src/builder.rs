//! Turns a `Request<T>` into a `WireRequest`.
//!
//! # Design
//! The query string is percent-encoded with a narrow allow-list (ASCII
//! letters, digits, and `- . _ ~ = : , &`). The backend expects exactly this
//! escaping, which is stricter than ordinary query encoding: `/`, `?`, `+`
//! and `%` inside values are always escaped.
//!
//! Body serialization is permissive. A body parameter with no JSON form
//! drops the body instead of failing the build. The only build failures are
//! structural: an origin or path that cannot form a URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::BuildError;
use crate::http::{HttpMethod, WireRequest};
use crate::params::{params_to_json, Params};
use crate::request::{Request, JSON_CONTENT_TYPE};

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Bytes escaped in a query string: everything except ASCII letters, digits,
/// and `- . _ ~ = : , &`. Non-ASCII bytes are always escaped.
pub const QUERY_ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'=')
    .remove(b':')
    .remove(b',')
    .remove(b'&');

/// Percent-encode `raw` with the query allow-list.
pub fn percent_encode_query(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_ESCAPED).to_string()
}

/// Render query parameters as an encoded query string, without the `?`.
///
/// Pairs are emitted in name order.
pub fn encode_query(params: &Params) -> String {
    let raw = params
        .iter()
        .map(|(name, value)| format!("{name}={}", value.to_query_text()))
        .collect::<Vec<_>>()
        .join("&");
    percent_encode_query(&raw)
}

/// Build the wire form of `request`.
pub fn build<T>(request: &Request<T>) -> Result<WireRequest, BuildError> {
    let origin = request.base_server().origin();
    let parsed = Url::parse(origin).map_err(|e| BuildError::InvalidBase {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;
    if !parsed.has_host() {
        return Err(BuildError::InvalidBase {
            origin: origin.to_string(),
            reason: "origin has no host".to_string(),
        });
    }

    let path = request.path();
    if !(path.is_empty() || path.starts_with('/')) || path.contains(['?', '#']) {
        return Err(BuildError::InvalidPath(path.to_string()));
    }

    let mut url = format!("{origin}{path}");
    if let Some(query) = request.query_params().filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&encode_query(query));
    }
    Url::parse(&url).map_err(|e| BuildError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    Ok(WireRequest {
        method: request.method(),
        url,
        headers: headers_for(request),
        body: body_for(request),
    })
}

fn body_for<T>(request: &Request<T>) -> Option<Vec<u8>> {
    if let Some(raw) = request.raw_body_bytes() {
        return Some(raw.to_vec());
    }
    let object = params_to_json(request.body_params()?)?;
    serde_json::to_vec(&object).ok()
}

fn headers_for<T>(request: &Request<T>) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    match request.method() {
        HttpMethod::Get => headers.push((ACCEPT.to_string(), JSON_CONTENT_TYPE.to_string())),
        HttpMethod::Post | HttpMethod::Patch => headers.push((
            CONTENT_TYPE.to_string(),
            request.content_type_value().to_string(),
        )),
        HttpMethod::Put | HttpMethod::Delete => {}
    }
    for (name, value) in request.headers().unwrap_or_default() {
        set_header(&mut headers, name, value);
    }
    headers
}

/// Replace any header with the same case-insensitive name, else append.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        Some(entry) => *entry = (name.to_string(), value.to_string()),
        None => headers.push((name.to_string(), value.to_string())),
    }
}
