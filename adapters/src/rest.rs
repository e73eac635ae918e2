//! REST backend adapter.
//!
//! This file contains the `RestBackend` trait, through which every call to the
//! institutional REST service travels, and its `reqwest` implementation. The
//! adapter classifies responses only; reacting to an authentication failure is
//! the caller's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outgoing call to the REST backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: RestMethod,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RestRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: RestMethod::Get,
            path: path.into(),
            bearer: None,
            body: None,
            timeout: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: RestMethod::Post,
            body: Some(body),
            ..Self::get(path)
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: RestMethod::Put,
            ..Self::post(path, body)
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: RestMethod::Patch,
            ..Self::post(path, body)
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: RestMethod::Delete,
            ..Self::get(path)
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
pub trait RestBackend: Send + Sync {
    /// Sends the request and returns the decoded JSON body (`Null` when empty).
    async fn send(&self, request: RestRequest) -> Result<Value, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, AdapterError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| AdapterError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AdapterError::InvalidUrl(base_url.to_string()));
        }
        // Url::join drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| AdapterError::Transport(err.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Resolves `path` against the base URL. The result must stay on the
    /// base origin and under the base path, or the bearer token would leave
    /// the backend.
    fn url_for(&self, path: &str) -> Result<Url, AdapterError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| AdapterError::InvalidUrl(err.to_string()))?;

        let same_origin = url.scheme() == self.base_url.scheme()
            && url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default();
        if !same_origin || !url.path().starts_with(self.base_url.path()) {
            return Err(AdapterError::InvalidUrl(format!(
                "{path} escapes the backend base url"
            )));
        }
        Ok(url)
    }
}

#[async_trait]
impl RestBackend for RestClient {
    async fn send(&self, request: RestRequest) -> Result<Value, AdapterError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self.http.request(request.method.as_reqwest(), url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(AdapterError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        if status.is_client_error() {
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            };
            debug!(%url, status = status.as_u16(), "backend refused request");
            return Err(AdapterError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%url, status = status.as_u16(), "backend call failed");
            return Err(AdapterError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| AdapterError::Decode(err.to_string()))
    }
}
