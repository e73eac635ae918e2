//! Central module for organizing the gateway's JSON API endpoints.
//!
//! This module acts as a top-level container for the API domains nested under
//! `/api`: the REST pass-through, the application context providers and the
//! signed-in user. Authentication routes are handled separately.

pub mod context;
pub mod proxy;
pub mod user;

use axum::Router;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/rest", proxy::routes::proxy_router())
        .nest("/context", context::routes::context_router())
        .nest("/me", user::routes::user_router())
}
