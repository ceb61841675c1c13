//! Preconfigured HTTP client for the StudyMate backend.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` is built at startup with the base URL and a fixed
//! `Content-Type: application/json` header. Verbs resolve relative paths
//! against the base URL and decode JSON replies into caller-chosen types.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-success statuses, and undecodable bodies map to
//! distinct `ApiError` variants. There is no retry layer; callers surface
//! the error and the user retries the action.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The request was rejected locally before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The backend returned a non-success HTTP status.
    #[error("{method} {url} returned status {status}")]
    Status { method: String, url: String, status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "E_API_INVALID_PATH",
            Self::InvalidRequest(_) => "E_API_INVALID_REQUEST",
            Self::Network { .. } => "E_API_NETWORK",
            Self::Status { .. } => "E_API_STATUS",
            Self::Decode { .. } => "E_API_DECODE",
            Self::ClientBuild(_) => "E_API_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Request-issuing handle bound to the backend base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build the client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidPath { path: path.to_owned(), reason: e.to_string() })
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or decode failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.http.get(url.clone());
        Self::execute(Method::GET, url, request).await
    }

    /// `POST` a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or decode failure.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.post(url.clone()).json(body);
        Self::execute(Method::POST, url, request).await
    }

    /// `PUT` a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or decode failure.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.put(url.clone()).json(body);
        Self::execute(Method::PUT, url, request).await
    }

    /// `DELETE` a resource. An empty reply body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or decode failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.http.delete(url.clone());
        Self::execute(Method::DELETE, url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%method, %url, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network { url: url.to_string(), message: e.to_string() })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network { url: url.to_string(), message: e.to_string() })?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "backend returned error status");
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        debug!(%method, %url, status = status.as_u16(), bytes = text.len(), "response received");
        decode_body(url.as_str(), &text)
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(url: &str, text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode { url: url.to_owned(), message: e.to_string() })
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
