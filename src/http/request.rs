//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) for requests that lack one
//! - Enforce the body size limit
//! - Convert the axum request into the host-independent IncomingRequest
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Non-UTF-8 bodies travel base64-encoded, flagged, like a function host
//!   would hand them over

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request},
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::gateway::{GatewayError, IncomingRequest};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Convert an axum request, buffering at most `max_body_bytes` of body.
pub async fn from_http(
    request: Request<Body>,
    max_body_bytes: usize,
) -> Result<IncomingRequest, GatewayError> {
    let (parts, body) = request.into_parts();

    let mut incoming = IncomingRequest::new(parts.method.as_str(), parts.uri.path());
    incoming.raw_query = parts.uri.query().map(str::to_string);
    incoming.headers = collect_headers(&parts.headers);

    // These never forward a body; don't let one fail them.
    if [Method::OPTIONS, Method::GET, Method::HEAD].contains(&parts.method) {
        return Ok(incoming);
    }

    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|e| GatewayError::Validation(format!("Request body could not be read: {}", e)))?;

    if !bytes.is_empty() {
        match std::str::from_utf8(&bytes) {
            Ok(text) => incoming.body = Some(text.to_string()),
            Err(_) => {
                incoming.body = Some(STANDARD.encode(&bytes));
                incoming.is_base64_encoded = true;
            }
        }
    }

    Ok(incoming)
}

/// Flatten a header map, joining repeated headers with `, `.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            tracing::warn!(header = %name, "Dropping non-UTF-8 header value");
            continue;
        };
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    out
}
