//! Global application error types and handlers.
//!
//! `AppError` unifies the per-layer errors used across the backend and
//! renders every one of them as a JSON `{ "error": ... }` response.

use adapters::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::services::{GatewayError, UnknownDomain};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("backend client setup failed: {0}")]
    Client(#[from] AdapterError),

    #[error(transparent)]
    UnknownDomain(#[from] UnknownDomain),

    #[error("invalid backend path: {0}")]
    InvalidPath(String),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Auth(err) => return err.into_response(),
            Self::Gateway(err) => return err.into_response(),
            Self::UnknownDomain(_) => StatusCode::NOT_FOUND,
            Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Client(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
