//! Outbound side: one HTTP call to the backend per request.
//!
//! # Design Decisions
//! - No retries, no redirects followed: exactly one call per request
//! - A non-2xx answer is a successful exchange, not an error
//! - Response bodies are fully buffered; memory per request is bounded by
//!   the largest upstream payload
//! - The whole exchange runs under a deadline (see `resilience::timeouts`)

pub mod client;

use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use thiserror::Error;

use crate::security::HeaderMapping;

pub use client::ReqwestForwarder;

/// Fully prepared request for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: String,
    /// Absolute URL on the backend origin.
    pub url: String,
    /// Filtered inbound headers plus the credential.
    pub headers: HeaderMapping,
    pub body: Option<Bytes>,
}

/// What the gateway keeps of the backend's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// The outbound call could not be made or did not complete.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Only the name is reported; the value may be a secret.
    #[error("Invalid value for header '{name}'")]
    InvalidHeader { name: String },

    #[error("Upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Request(reqwest::Error),
}

/// Performs the single outbound call.
pub trait Forwarder: Send + Sync + 'static {
    fn forward(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, ForwardError>> + Send;
}
