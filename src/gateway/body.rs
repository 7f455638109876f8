//! Outbound body policy.

use axum::body::Bytes;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::gateway::GatewayError;

/// Methods that never carry a body upstream.
const BODYLESS_METHODS: &[&str] = &["GET", "HEAD"];

/// Body to forward for `method`, decoding base64 when flagged.
///
/// `None` for bodyless methods whatever was received, and for an absent or
/// empty body.
pub fn outbound_body(
    method: &str,
    body: Option<&str>,
    is_base64_encoded: bool,
) -> Result<Option<Bytes>, GatewayError> {
    if BODYLESS_METHODS.iter().any(|m| *m == method) {
        return Ok(None);
    }

    match body {
        None | Some("") => Ok(None),
        Some(encoded) if is_base64_encoded => Ok(Some(Bytes::from(STANDARD.decode(encoded)?))),
        Some(text) => Ok(Some(Bytes::copy_from_slice(text.as_bytes()))),
    }
}
