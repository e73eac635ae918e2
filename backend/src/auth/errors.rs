//! Custom error types specific to authentication failures.
//!
//! Rejected logins, missing sessions and missing user ids are reported here;
//! a session rejected by the backend mid-flight is a gateway error instead.

use adapters::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NotAuthenticated,

    #[error("only student sessions have student data")]
    NotStudent,

    #[error("session has no usable user id")]
    MissingUserId,

    #[error("login service unavailable: {0}")]
    Upstream(AdapterError),
}

impl AuthError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotStudent => StatusCode::FORBIDDEN,
            Self::MissingUserId => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<AdapterError> for AuthError {
    fn from(err: AdapterError) -> Self {
        if err.is_auth_failure() {
            Self::InvalidCredentials
        } else {
            Self::Upstream(err)
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
