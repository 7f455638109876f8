//! Backend-forwarding gateway library.
//!
//! Sits between untrusted callers and a private backend API: injects the
//! backend credential, strips hop-by-hop headers, answers CORS, and refuses
//! to be pointed anywhere but the configured backend.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use gateway::{GatewayError, GatewayHandler, IncomingRequest, ProxyResponse};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{Forwarder, ReqwestForwarder};
