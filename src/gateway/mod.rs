//! Backend-forwarding gateway core.
//!
//! Host-independent: takes an [`IncomingRequest`], returns a
//! [`ProxyResponse`]. The HTTP server in [`crate::http`] and the one-shot
//! `invoke` command are both thin adapters around [`GatewayHandler`].
//!
//! # Data Flow
//! ```text
//! IncomingRequest
//!     → config::sources (base URL + credential, per invocation)
//!     → request.rs (normalize method, sub-path, query)
//!     → security (path guard, header filter, credential)
//!     → body.rs (body policy)
//!     → upstream (single outbound call)
//!     → response.rs (status/body passthrough or error envelope, CORS)
//! ```

pub mod body;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;

pub use error::{GatewayError, PROXY_ERROR};
pub use handler::GatewayHandler;
pub use request::{normalize, IncomingRequest, NormalizedRequest};
pub use response::{ProxyResponse, CORS_HEADERS};
