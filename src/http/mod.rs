pub mod client;

pub use client::ReqwestHttpClient;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;

/// Transport abstraction - concrete providers send requests through this
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and return the raw response, whatever its status
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// Outgoing request description
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Query parameters, appended and percent-encoded by the client
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level errors
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Carries no request URL, so query-string secrets never reach messages
    #[error("Network error: {0}")]
    NetworkFailure(reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        HttpError::NetworkFailure(e.without_url())
    }
}

/// Send a request, require a 2xx status and decode the JSON body
pub async fn send_json<T: DeserializeOwned>(
    client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<T, HttpError> {
    let response = client.send(request).await?;

    if !response.is_success() {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        return Err(HttpError::Status {
            status: response.status,
            body: crate::logging::redact_secrets(&body),
        });
    }

    Ok(serde_json::from_slice(&response.body)?)
}
