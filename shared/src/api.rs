//! Remote resource client types and transport trait
//!
//! This module defines the HTTP contract that the browser transport
//! (gloo-net) implements, plus the response normalization every form
//! consumes. Nothing here touches browser APIs, so it is tested natively.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback text when the backend gives us nothing usable.
pub const UNEXPECTED_ERROR: &str = "Error inesperado.";

/// Shown when the request never got an answer.
pub const NO_RESPONSE_ERROR: &str =
    "No se recibió respuesta del servidor. Verifica tu conexión.";

/// API error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable or the request could not be issued
    #[error("Network error: {0}")]
    Transport(String),
    /// Server returned a non-2xx status
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Body was not the JSON we expected
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text for the operator. `Api` carries the extracted `detail`,
    /// the other kinds collapse to fixed messages.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Parse(_) => UNEXPECTED_ERROR.to_string(),
            ApiError::Transport(_) => NO_RESPONSE_ERROR.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// API endpoint definitions
pub mod endpoints {
    pub const VERIFY_SESSION: &str = "/dashboard/verify-session";
    pub const LOGIN: &str = "/login";
    pub const CATEGORIES: &str = "/category";
    pub const PRODUCTS: &str = "/products";
    pub const CREATE_USER: &str = "/api/create/users";

    pub fn category(id: i64) -> String {
        format!("/category/{}", id)
    }

    pub fn product(id: i64) -> String {
        format!("/products/{}", id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One call against the backend: resource path, method and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// What the transport hands back before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for the wire underneath the resource client
///
/// Implementations only report `ApiError::Transport` themselves; status
/// and body interpretation happens in [`ResourceClient`].
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Configuration for creating an API client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    /// Base URL of the server (e.g., "http://localhost:8000"). Empty means same origin.
    pub base_url: String,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Error body convention: `{detail: string | [{msg, ...}]}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Items(Vec<DetailItem>),
    Text(String),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    msg: Option<String>,
}

/// Pull the operator-facing message out of an error body.
///
/// A list `detail` joins each item's `msg` with ", ", a scalar `detail`
/// is used as-is, anything else falls back to [`UNEXPECTED_ERROR`].
pub fn extract_error_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    let message = match detail {
        Some(Detail::Items(items)) => items
            .into_iter()
            .filter_map(|item| item.msg)
            .collect::<Vec<_>>()
            .join(", "),
        Some(Detail::Text(text)) => text,
        Some(Detail::Other(value @ Value::Number(_))) => value.to_string(),
        _ => String::new(),
    };

    if message.is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

/// Turn a raw response into the uniform result.
pub fn normalize_response(response: RawResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Api {
            status: response.status,
            message: extract_error_message(&response.body),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Uniform client over any [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct ResourceClient<T> {
    transport: T,
}

impl<T: HttpTransport> ResourceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue the request and normalize the outcome.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let response = self.transport.send(request).await.inspect_err(|e| {
            log::error!("{} {} failed: {}", request.method.as_str(), request.path, e);
        })?;

        normalize_response(response).inspect_err(|e| {
            log::warn!("{} {} -> {}", request.method.as_str(), request.path, e);
        })
    }

    /// Like [`send`](Self::send) but deserializes the body into `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Status-only check: any 2xx is success, the body is ignored.
    pub async fn check(&self, request: &ApiRequest) -> Result<(), ApiError> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::Api {
                status: response.status,
                message: extract_error_message(&response.body),
            })
        }
    }
}
