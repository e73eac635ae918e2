//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to the REST
//! backend, providing a unified error type for every call the gateway makes.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The backend refused the bearer token or the credentials (401/403).
    #[error("backend rejected the request with status {status}")]
    Unauthorized { status: u16 },

    #[error("backend request timed out")]
    Timeout,

    #[error("backend unreachable: {0}")]
    Transport(String),

    /// A 4xx other than 401/403, with the backend's JSON body kept intact.
    #[error("backend refused the request with status {status}")]
    Status { status: u16, body: Value },

    #[error("backend answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed backend payload: {0}")]
    Decode(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl AdapterError {
    /// Returns `true` when the backend reported an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
