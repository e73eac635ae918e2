//! Middleware for protecting page routes and handling authorization.
//!
//! This module contains the route guard (authenticated? allowed role?), the
//! axum middleware applying it to every page request, and the extractors that
//! load the cookie-backed session and the caller's system.

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use adapters::{CookieStore, SessionStore};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::header::{COOKIE, REFERER, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::{debug, warn};

use super::models::Role;
use super::service::SessionService;
use crate::router::{resolve, AccessDeniedView, Access, System};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Full navigation to a login route; nothing is rendered.
    Redirect { location: &'static str },
    Deny(AccessDeniedView),
}

/// Decides whether a page of `system` may render for this session.
///
/// `allowed` of `None` or an empty set means any authenticated role.
pub fn evaluate_guard<S: SessionStore>(
    session: &SessionService<S>,
    system: System,
    allowed: Option<&[Role]>,
) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Redirect {
            location: system.login_path(),
        };
    }

    match allowed {
        Some(roles) if !roles.is_empty() => {
            let role = session.get_user_role();
            if role.as_ref().is_some_and(|r| r.is_one_of(roles)) {
                GuardDecision::Render
            } else {
                GuardDecision::Deny(AccessDeniedView::new(system, role.as_ref(), roles))
            }
        }
        _ => GuardDecision::Render,
    }
}

/// Guards every page request against the route table.
///
/// Allowed requests continue with their `RouteMatch` in the extensions;
/// unmatched paths continue without one and render as not found.
pub async fn route_guard(session: PortalSession, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let Some(hit) = resolve(&path) else {
        return next.run(request).await;
    };

    let allowed = match hit.route.access {
        Access::Public => None,
        Access::Authenticated => Some(None),
        Access::Roles(roles) => Some(Some(roles)),
    };

    if let Some(allowed) = allowed {
        match evaluate_guard(&session.0, hit.route.system, allowed) {
            GuardDecision::Render => {}
            GuardDecision::Redirect { location } => {
                debug!(%path, location, "unauthenticated, redirecting to login");
                return Redirect::to(location).into_response();
            }
            GuardDecision::Deny(view) => {
                debug!(%path, role = ?view.current_role, "role not allowed");
                return (StatusCode::FORBIDDEN, Json(view)).into_response();
            }
        }
    }

    request.extensions_mut().insert(hit);
    next.run(request).await
}

/// The request's session, loaded from its cookies.
pub struct PortalSession(pub SessionService<CookieStore>);

impl PortalSession {
    /// Attaches the session's pending cookie writes to `response`.
    pub fn respond(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        for cookie in self.0.store().set_cookie_headers() {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(err) => warn!(%err, "dropping unrepresentable Set-Cookie header"),
            }
        }
        response
    }
}

impl Deref for PortalSession {
    type Target = SessionService<CookieStore>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PortalSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for PortalSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok());
        let store = CookieStore::from_header_values(cookies, state.config.cookie_options());
        Ok(Self(SessionService::new(store)))
    }
}

/// System of the page that issued an API call, read from its `Referer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerSystem(pub System);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CallerSystem {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let system = parts
            .headers
            .get(REFERER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Uri>().ok())
            .map(|uri| System::from_path(uri.path()))
            .unwrap_or_default();
        Ok(Self(system))
    }
}
