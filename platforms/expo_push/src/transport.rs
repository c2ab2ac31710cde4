use std::time::Duration;

use async_trait::async_trait;
use common::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use reqwest::{Client, Method};

/// [`HttpTransport`] backed by a `reqwest` client.
///
/// Pass your own [`Client`] for custom proxy or TLS behaviour.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// A transport whose client gives up on any request after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        let mut builder = self.http_client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::NetworkError(e.to_string())
    }
}
