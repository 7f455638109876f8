//! Response building for every terminal state of the pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;
use crate::upstream::UpstreamResponse;

/// Attached to every response, preflight and errors included.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,PATCH,DELETE,OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
];

const CONTENT_TYPE: &str = "Content-Type";

/// The only thing a caller ever sees, in host-event response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn with_cors(status_code: u16, body: String) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// `200`, empty body, CORS headers only.
    pub fn preflight() -> Self {
        Self::with_cors(200, String::new())
    }

    /// JSON error envelope with the status of `error`.
    pub fn from_error(error: &GatewayError) -> Self {
        let mut response = Self::with_cors(error.status(), error.envelope().to_string());
        response
            .headers
            .insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        response
    }

    /// Upstream status and body verbatim, content type passed through.
    pub fn from_upstream(upstream: UpstreamResponse) -> Self {
        let body = String::from_utf8_lossy(&upstream.body).into_owned();
        let mut response = Self::with_cors(upstream.status, body);
        if let Some(content_type) = upstream.content_type {
            response.headers.insert(CONTENT_TYPE.to_string(), content_type);
        }
        response
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether all CORS headers are present with their fixed values.
    pub fn has_cors_headers(&self) -> bool {
        CORS_HEADERS
            .iter()
            .all(|(name, value)| self.header(name) == Some(*value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[test]
    fn test_preflight() {
        let response = ProxyResponse::preflight();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.headers.len(), CORS_HEADERS.len());
        assert!(response.has_cors_headers());
    }

    #[test]
    fn test_upstream_passthrough() {
        let response = ProxyResponse::from_upstream(UpstreamResponse {
            status: 404,
            content_type: Some("text/plain".into()),
            body: Bytes::from_static(b"not found"),
        });
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "not found");
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert!(response.has_cors_headers());
    }

    #[test]
    fn test_upstream_without_content_type() {
        let response = ProxyResponse::from_upstream(UpstreamResponse {
            status: 204,
            content_type: None,
            body: Bytes::new(),
        });
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn test_error_envelope() {
        let response = ProxyResponse::from_error(&GatewayError::Configuration("missing".into()));
        assert_eq!(response.status_code, 500);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "missing");
        assert!(response.has_cors_headers());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ProxyResponse::preflight()).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(json["body"], "");
    }
}
