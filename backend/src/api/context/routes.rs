//! Defines the HTTP routes for the application context providers.

use axum::routing::get;
use axum::Router;

use super::handlers::{list_providers, load_provider};
use crate::state::AppState;

pub fn context_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_providers))
        .route("/:domain", get(load_provider))
}
