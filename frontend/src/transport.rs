//! Browser wire for the resource client.

use crate::utils;
use gloo_net::http::{Request, RequestBuilder};
use shared::{
    ApiClientConfig, ApiError, ApiRequest, HttpTransport, Method, RawResponse, ResourceClient,
};
use web_sys::RequestCredentials;

/// `fetch` with the session cookie attached to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTransport {
    config: ApiClientConfig,
}

impl BrowserTransport {
    pub fn new(config: ApiClientConfig) -> Self {
        Self { config }
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.config.url(&request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        builder.credentials(RequestCredentials::Include)
    }
}

impl HttpTransport for BrowserTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let builder = self.builder(request);
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        raw_response(status, status_text, response.text().await)
    }
}

/// A body that cannot be read fails the whole call, whatever the status.
fn raw_response<E: std::fmt::Display>(
    status: u16,
    status_text: String,
    body: Result<String, E>,
) -> Result<RawResponse, ApiError> {
    let body = body.map_err(|e| {
        log::warn!("Failed to read response body (status {}): {}", status, e);
        ApiError::Transport(format!("reading response body: {}", e))
    })?;
    Ok(RawResponse {
        status,
        status_text,
        body,
    })
}

/// Client bound to the configured backend.
pub fn client() -> ResourceClient<BrowserTransport> {
    ResourceClient::new(BrowserTransport::new(utils::api_config()))
}
