//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle login, logout and session status. They are nested
//! under `/auth` in the main Axum router.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{login, logout, session_status};
use crate::state::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session_status))
}
