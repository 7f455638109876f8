//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway as catch-all handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Graceful shutdown on the lifecycle broadcast

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigSource, EnvSource, GatewayConfig};
use crate::gateway::GatewayHandler;
use crate::http::request::{from_http, UuidRequestId};
use crate::upstream::{ForwardError, Forwarder, ReqwestForwarder};

/// HTTP server hosting the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that reads backend settings from the process
    /// environment and forwards with reqwest.
    pub fn new(config: GatewayConfig) -> Result<Self, ForwardError> {
        let forwarder = ReqwestForwarder::new(&config.timeouts)?;
        Ok(Self::with_source(config, Arc::new(EnvSource), forwarder))
    }

    /// Create a server with an explicit config source and forwarder.
    pub fn with_source<F: Forwarder>(
        config: GatewayConfig,
        config_source: Arc<dyn ConfigSource>,
        forwarder: F,
    ) -> Self {
        let handler = Arc::new(GatewayHandler::new(&config, config_source, forwarder));
        let router = build_router(handler);
        Self { router, config }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            function_prefix = %self.config.gateway.function_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router<F: Forwarder>(handler: Arc<GatewayHandler<F>>) -> Router {
    Router::new()
        .fallback(gateway_handler::<F>)
        .with_state(handler)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

/// Every method and path lands here.
async fn gateway_handler<F: Forwarder>(
    State(handler): State<Arc<GatewayHandler<F>>>,
    request: Request<Body>,
) -> Response {
    let method = request.method().to_string();
    match from_http(request, handler.max_body_bytes()).await {
        Ok(incoming) => handler.handle(&incoming).await.into_response(),
        Err(e) => handler.reject(&method, e).into_response(),
    }
}
