//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn a ProxyResponse into an axum response
//!
//! # Design Decisions
//! - No default content type is added; only what the gateway decided to send
//! - Headers that are not valid on the wire are dropped with a warning
//!   rather than failing the whole response

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::gateway::ProxyResponse;

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let ProxyResponse {
            status_code,
            headers,
            body,
        } = self;

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_GATEWAY);

        let out = response.headers_mut();
        for (name, value) in headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    out.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}
