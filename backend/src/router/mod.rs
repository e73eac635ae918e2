//! System router: maps page paths to one of the three system layouts.
//!
//! Every page request is resolved against the static route table, passed
//! through the route guard, then composed into its system's chrome together
//! with the application providers and any scoped provider the route needs.
//! Unmatched paths render the not-found view inside the main site chrome.

pub mod layout;
pub mod system;
pub mod table;
pub mod views;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json, Router};

pub use layout::{Chrome, Navbar, Sidebar};
pub use system::System;
pub use table::{resolve, Access, RouteDescriptor, RouteMatch, ScopedProvider, ROUTES};
pub use views::{AccessDeniedView, NotFoundView, PageView, ViewAction};

use crate::auth::{route_guard, PortalSession};
use crate::state::AppState;

/// Router serving every page path, guarded.
pub fn page_router(state: AppState) -> Router {
    Router::new()
        .fallback(render_page)
        .layer(from_fn_with_state(state.clone(), route_guard))
        .with_state(state)
}

async fn render_page(
    State(state): State<AppState>,
    session: PortalSession,
    uri: Uri,
    hit: Option<Extension<RouteMatch>>,
) -> Response {
    let path = uri.path();
    match hit {
        Some(Extension(hit)) => {
            let view = PageView::new(&hit, state.context.provider_names(), session.summary());
            Json(view).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(NotFoundView::new(path))).into_response(),
    }
}
