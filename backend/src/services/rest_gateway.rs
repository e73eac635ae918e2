//! The one REST client every page-level backend call goes through.
//!
//! `RestGateway` attaches the session's bearer token to outgoing calls and
//! intercepts authentication failures: a 401/403 from the backend clears the
//! session and turns into a redirect to the caller's system login. The login
//! call itself is not intercepted.

use std::sync::Arc;

use adapters::{AdapterError, Credentials, LoginResponse, RestBackend, RestRequest, SessionStore};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::SessionService;
use crate::router::System;

const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("session expired, sign in again")]
    SessionExpired { login: &'static str },

    /// The backend refused the request itself (validation, missing record).
    #[error("backend refused the request with status {status}")]
    Rejected { status: StatusCode, body: Value },

    #[error("backend request timed out")]
    Timeout,

    #[error(transparent)]
    Upstream(AdapterError),
}

impl GatewayError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::SessionExpired { .. } => StatusCode::UNAUTHORIZED,
            Self::Rejected { status, .. } => *status,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::SessionExpired { login } => json!({ "error": self.to_string(), "redirect": login }),
            Self::Rejected { body, .. } if !body.is_null() => body.clone(),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct RestGateway {
    backend: Arc<dyn RestBackend>,
}

impl RestGateway {
    pub fn new(backend: Arc<dyn RestBackend>) -> Self {
        Self { backend }
    }

    /// Sends `request` with the session's token attached.
    ///
    /// On an authentication failure the whole session is cleared and the
    /// error carries `system`'s login route.
    pub async fn call<S: SessionStore>(
        &self,
        session: &mut SessionService<S>,
        system: System,
        request: RestRequest,
    ) -> Result<Value, GatewayError> {
        let request = match session.get_token() {
            Some(token) => request.bearer(token),
            None => request,
        };
        let path = request.path.clone();

        match self.backend.send(request).await {
            Ok(body) => Ok(body),
            Err(err) if err.is_auth_failure() => {
                info!(%path, "backend rejected session");
                let login = session.invalidate(system);
                Err(GatewayError::SessionExpired { login })
            }
            Err(AdapterError::Status { status, body }) => {
                debug!(%path, status, "backend refused request");
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
                Err(GatewayError::Rejected { status, body })
            }
            Err(AdapterError::Timeout) => {
                warn!(%path, "backend call timed out");
                Err(GatewayError::Timeout)
            }
            Err(err) => {
                warn!(%path, %err, "backend call failed");
                Err(GatewayError::Upstream(err))
            }
        }
    }

    /// Exchanges credentials for a session at the backend.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AdapterError> {
        let body =
            serde_json::to_value(credentials).map_err(|err| AdapterError::Decode(err.to_string()))?;
        let answer = self
            .backend
            .send(RestRequest::post(LOGIN_ENDPOINT, body))
            .await?;
        serde_json::from_value(answer).map_err(|err| AdapterError::Decode(err.to_string()))
    }
}
