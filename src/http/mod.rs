//! HTTP host for the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → request.rs (axum Request → IncomingRequest)
//!     → gateway::GatewayHandler
//!     → response.rs (ProxyResponse → axum Response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{from_http, UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, HttpServer};
