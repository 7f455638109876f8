//! reqwest-backed forwarder.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{redirect, Client, Method};

use crate::config::schema::TimeoutConfig;
use crate::resilience::timeouts::with_deadline;
use crate::security::HeaderMapping;
use crate::upstream::{ForwardError, Forwarder, OutgoingRequest, UpstreamResponse};

/// Forwards over a shared connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestForwarder {
    client: Client,
    deadline: Duration,
}

impl ReqwestForwarder {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ForwardError::Request)?;

        Ok(Self {
            client,
            deadline: Duration::from_secs(timeouts.upstream_secs),
        })
    }

    async fn exchange(&self, request: OutgoingRequest) -> Result<UpstreamResponse, ForwardError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ForwardError::InvalidMethod(request.method.clone()))?;
        let headers = to_header_map(&request.headers)?;

        let mut builder = self.client.request(method, &request.url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(request_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(request_error)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

impl Forwarder for ReqwestForwarder {
    fn forward(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, ForwardError>> + Send {
        with_deadline(self.deadline, self.exchange(request))
    }
}

/// Build the outbound header map. `content-length` is left to the client,
/// which frames the body it actually sends.
fn to_header_map(headers: &HeaderMapping) -> Result<HeaderMap, ForwardError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ForwardError::InvalidHeader { name: name.clone() })?;
        if header_name == CONTENT_LENGTH {
            continue;
        }
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ForwardError::InvalidHeader { name: name.clone() })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Strip the URL from client errors so backend addresses never reach callers.
fn request_error(e: reqwest::Error) -> ForwardError {
    ForwardError::Request(e.without_url())
}
