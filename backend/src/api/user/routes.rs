//! Defines the HTTP routes for the signed-in user.

use axum::routing::get;
use axum::Router;

use super::handlers::{current_user, student_profile};
use crate::state::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_user))
        .route("/profile", get(student_profile))
}
