//! Inbound request model and normalization.
//!
//! [`IncomingRequest`] mirrors the event a function host hands over for each
//! invocation. It is never mutated; [`normalize`] derives the method, backend
//! sub-path and query string from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One inbound invocation, in host-event shape.
///
/// Hosts may send any field as `null`; that reads the same as omitting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    /// HTTP verb as received. Empty means `GET`.
    #[serde(rename = "httpMethod", default, deserialize_with = "null_as_default")]
    pub method: String,

    /// Full inbound path, function prefix included.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    /// Query string without the leading `?`.
    #[serde(default)]
    pub raw_query: Option<String>,

    /// Inbound headers. Multi-value headers arrive pre-joined.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub body: Option<String>,

    /// `body` holds base64 rather than text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.raw_query = Some(query.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    pub fn with_base64_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = true;
        self
    }

    /// Method as received, defaulting to `GET`. Methods are case-sensitive,
    /// so `patch` is forwarded as `patch`.
    pub fn method(&self) -> &str {
        if self.method.is_empty() {
            "GET"
        } else {
            &self.method
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.method() == "OPTIONS"
    }
}

/// Routing-relevant view of an [`IncomingRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub method: String,
    /// Always starts with `/` unless the caller appended text directly to
    /// the prefix; the path guard deals with that case.
    pub sub_path: String,
    /// Empty or starting with `?`.
    pub query: String,
}

impl NormalizedRequest {
    /// `<base><sub-path><query>`.
    pub fn target_url(&self, base_url: &str) -> String {
        format!("{}{}{}", base_url, self.sub_path, self.query)
    }
}

/// Strip `prefix` from the inbound path.
///
/// An empty remainder, or a path outside the prefix, becomes `/`.
pub fn normalize(request: &IncomingRequest, prefix: &str) -> NormalizedRequest {
    let prefix = prefix.trim_end_matches('/');
    let sub_path = match request.path.strip_prefix(prefix) {
        Some("") | None => "/".to_string(),
        Some(rest) => rest.to_string(),
    };

    let query = match request.raw_query.as_deref() {
        Some(q) if !q.is_empty() => format!("?{}", q),
        _ => String::new(),
    };

    NormalizedRequest {
        method: request.method().to_string(),
        sub_path,
        query,
    }
}
