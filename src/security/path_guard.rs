//! SSRF guard for the forwarded sub-path.
//!
//! Two checks, both rejecting with a validation error before any outbound
//! call exists:
//! - the sub-path must not itself be an absolute `http:`/`https:` URL
//! - the assembled target must still point at the configured backend origin

use url::Url;

use crate::gateway::GatewayError;

/// Message returned to callers when the sub-path smuggles a URL.
pub const ABSOLUTE_URL_REJECTED: &str = "Absolute URLs are not allowed";

/// Case-insensitive `^https?:` test.
pub fn is_absolute_url(sub_path: &str) -> bool {
    let lower = sub_path
        .get(..6)
        .unwrap_or(sub_path)
        .to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

/// Reject a sub-path that is itself an absolute URL.
pub fn check_sub_path(sub_path: &str) -> Result<(), GatewayError> {
    if is_absolute_url(sub_path) {
        return Err(GatewayError::Validation(ABSOLUTE_URL_REJECTED.to_string()));
    }
    Ok(())
}

/// Ensure `target` parses and shares scheme, host and port with `base_url`.
pub fn check_target(base_url: &str, target: &str) -> Result<(), GatewayError> {
    let base = Url::parse(base_url).map_err(GatewayError::BaseUrl)?;
    let parsed = Url::parse(target)
        .map_err(|e| GatewayError::Validation(format!("Invalid target URL: {}", e)))?;

    if parsed.origin() != base.origin() {
        return Err(GatewayError::Validation(
            "Target URL escapes the configured backend".to_string(),
        ));
    }
    Ok(())
}
