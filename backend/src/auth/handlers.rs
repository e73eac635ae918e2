//! Handler functions for authentication-related API endpoints.
//!
//! These functions process login, logout and session-status requests. Login
//! forwards the credentials to the REST backend through the gateway and writes
//! the returned session into the browser's cookies; logout clears them all.

use adapters::Credentials;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::errors::AuthError;
use super::middleware::PortalSession;
use super::models::{LoginForm, LoginOutcome};
use crate::router::System;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    mut session: PortalSession,
    Json(form): Json<LoginForm>,
) -> Result<Response, AuthError> {
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };
    let granted = state.gateway.login(&credentials).await?;
    session.establish(&granted);

    let summary = session.summary();
    info!(
        system = form.system.as_str(),
        role = ?summary.role,
        "session established"
    );
    let outcome = LoginOutcome {
        redirect: form.system.home_for(summary.role.as_ref()),
        session: summary,
    };
    Ok(session.respond(Json(outcome)))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutQuery {
    pub system: Option<System>,
    /// Page the user signed out from, used when `system` is absent.
    pub from: Option<String>,
}

/// Clears the whole session and navigates to the system's login route.
pub async fn logout(mut session: PortalSession, Query(query): Query<LogoutQuery>) -> Response {
    let system = query
        .system
        .or_else(|| query.from.as_deref().map(System::from_path))
        .unwrap_or_default();
    let login = session.invalidate(system);
    session.respond(Redirect::to(login))
}

pub async fn session_status(session: PortalSession) -> impl IntoResponse {
    Json(session.summary())
}
