//! The request pipeline.
//!
//! ```text
//! Start → OPTIONS? → Preflight
//!       → ResolveConfig  (fail → 500)
//!       → Normalize + Guard (reject → 400)
//!       → FilterHeaders → InjectCredential → PrepareBody
//!       → Forward (fail → 502)
//!       → upstream status/body passthrough
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::config::{resolve_backend, BackendSources, ConfigSource, GatewayConfig, GatewaySettings};
use crate::gateway::body::outbound_body;
use crate::gateway::request::{normalize, IncomingRequest};
use crate::gateway::response::ProxyResponse;
use crate::gateway::GatewayError;
use crate::observability::metrics;
use crate::security::{check_sub_path, check_target, filter_headers, inject_credential};
use crate::upstream::{Forwarder, OutgoingRequest, UpstreamResponse};

/// Stateless per-request handler. Safe to share across concurrent requests:
/// everything it owns is read-only after construction.
pub struct GatewayHandler<F> {
    settings: GatewaySettings,
    sources: BackendSources,
    max_body_bytes: usize,
    config_source: Arc<dyn ConfigSource>,
    forwarder: F,
}

impl<F: Forwarder> GatewayHandler<F> {
    pub fn new(config: &GatewayConfig, config_source: Arc<dyn ConfigSource>, forwarder: F) -> Self {
        Self {
            settings: config.gateway.clone(),
            sources: config.backend.clone(),
            max_body_bytes: config.limits.max_body_bytes,
            config_source,
            forwarder,
        }
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Run one invocation to completion. Never fails: every error becomes a
    /// well-formed response carrying the CORS headers.
    pub async fn handle(&self, request: &IncomingRequest) -> ProxyResponse {
        let start = Instant::now();
        let method = request.method();

        if request.is_preflight() {
            tracing::debug!(path = %request.path, "CORS preflight");
            metrics::record_request(method, 200, "preflight", start);
            return ProxyResponse::preflight();
        }

        let (response, outcome) = match self.proxy(request).await {
            Ok(upstream) => (ProxyResponse::from_upstream(upstream), "forwarded"),
            Err(e) => {
                match &e {
                    GatewayError::Configuration(_) => {
                        tracing::error!(error = %e, "Gateway misconfigured")
                    }
                    GatewayError::Validation(_) => {
                        tracing::warn!(path = %request.path, error = %e, "Request rejected")
                    }
                    GatewayError::Upstream(_) | GatewayError::BaseUrl(_) | GatewayError::Body(_) => {
                        tracing::error!(path = %request.path, error = %e, "Upstream error")
                    }
                }
                (ProxyResponse::from_error(&e), e.kind())
            }
        };

        metrics::record_request(method, response.status_code, outcome, start);
        response
    }

    /// Handle an error raised by the host before the pipeline could run.
    pub fn reject(&self, request_method: &str, error: GatewayError) -> ProxyResponse {
        tracing::warn!(error = %error, "Request rejected by host adapter");
        let response = ProxyResponse::from_error(&error);
        metrics::record_request(request_method, response.status_code, error.kind(), Instant::now());
        response
    }

    async fn proxy(&self, request: &IncomingRequest) -> Result<UpstreamResponse, GatewayError> {
        let backend = resolve_backend(self.config_source.as_ref(), &self.sources)?;

        let normalized = normalize(request, &self.settings.function_prefix);
        check_sub_path(&normalized.sub_path)?;
        let target = normalized.target_url(&backend.base_url);
        check_target(&backend.base_url, &target)?;

        let headers = filter_headers(&request.headers);
        let headers = inject_credential(
            headers,
            &self.settings.credential_header,
            backend.credential.as_deref(),
        );

        let body = outbound_body(
            &normalized.method,
            request.body.as_deref(),
            request.is_base64_encoded,
        )?;

        tracing::debug!(
            method = %normalized.method,
            sub_path = %normalized.sub_path,
            credential = backend.credential.is_some(),
            "Forwarding request"
        );

        let outgoing = OutgoingRequest {
            method: normalized.method,
            url: target,
            headers,
            body,
        };
        let upstream = self.forwarder.forward(outgoing).await?;

        tracing::debug!(status = upstream.status, "Upstream responded");
        Ok(upstream)
    }
}
