//! Defines the HTTP routes of the REST pass-through.

use axum::routing::get;
use axum::Router;

use super::handlers::{forward_delete, forward_get, forward_patch, forward_post, forward_put};
use crate::state::AppState;

pub fn proxy_router() -> Router<AppState> {
    Router::new().route(
        "/*path",
        get(forward_get)
            .post(forward_post)
            .put(forward_put)
            .patch(forward_patch)
            .delete(forward_delete),
    )
}
