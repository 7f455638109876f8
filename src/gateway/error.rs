//! Failure taxonomy of the request pipeline.

use serde_json::{json, Value};
use thiserror::Error;

use crate::upstream::ForwardError;

/// `error` field of every 502 envelope.
pub const PROXY_ERROR: &str = "Proxy error";

/// Every way a request can terminate without an upstream response.
///
/// A non-2xx upstream status is not represented here: it is a normal
/// response and passes through untouched.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Backend base URL could not be resolved.
    #[error("{0}")]
    Configuration(String),

    /// Caller input rejected before any outbound call.
    #[error("{0}")]
    Validation(String),

    /// The outbound call could not be prepared or did not complete.
    #[error(transparent)]
    Upstream(#[from] ForwardError),

    /// Backend base URL resolved but is not an absolute URL.
    #[error("Backend base URL is invalid: {0}")]
    BaseUrl(url::ParseError),

    /// Request body was flagged base64 but did not decode.
    #[error("Invalid base64 request body: {0}")]
    Body(#[from] base64::DecodeError),
}

impl GatewayError {
    /// HTTP status returned to the caller.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Configuration(_) => 500,
            GatewayError::Validation(_) => 400,
            GatewayError::Upstream(_) | GatewayError::BaseUrl(_) | GatewayError::Body(_) => 502,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "config_error",
            GatewayError::Validation(_) => "validation_error",
            GatewayError::Upstream(_) | GatewayError::BaseUrl(_) | GatewayError::Body(_) => {
                "upstream_error"
            }
        }
    }

    /// JSON envelope sent to the caller.
    pub fn envelope(&self) -> Value {
        match self {
            GatewayError::Configuration(msg) | GatewayError::Validation(msg) => {
                json!({ "error": msg })
            }
            GatewayError::Upstream(_) | GatewayError::BaseUrl(_) | GatewayError::Body(_) => {
                json!({ "error": PROXY_ERROR, "message": self.to_string() })
            }
        }
    }
}
