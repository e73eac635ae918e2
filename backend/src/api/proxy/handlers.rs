//! Handler functions for the REST pass-through.
//!
//! Each handler rebuilds the backend path from the captured tail and query,
//! sends it through the gateway on behalf of the caller's session, and returns
//! the backend's JSON along with any cookie changes the gateway made.

use adapters::RestRequest;
use axum::extract::{Path, RawQuery, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::auth::{CallerSystem, PortalSession};
use crate::errors::AppError;
use crate::router::System;
use crate::state::AppState;

pub async fn forward_get(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    session: PortalSession,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    forward(state, system, session, &path, query, |target| RestRequest::get(target)).await
}

pub async fn forward_post(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    session: PortalSession,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    forward(state, system, session, &path, query, |target| {
        RestRequest::post(target, body)
    })
    .await
}

pub async fn forward_put(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    session: PortalSession,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    forward(state, system, session, &path, query, |target| {
        RestRequest::put(target, body)
    })
    .await
}

pub async fn forward_patch(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    session: PortalSession,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    forward(state, system, session, &path, query, |target| {
        RestRequest::patch(target, body)
    })
    .await
}

pub async fn forward_delete(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    session: PortalSession,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    forward(state, system, session, &path, query, |target| {
        RestRequest::delete(target)
    })
    .await
}

async fn forward(
    state: AppState,
    system: System,
    mut session: PortalSession,
    tail: &str,
    query: Option<String>,
    request: impl FnOnce(String) -> RestRequest,
) -> Response {
    let result = match backend_path(tail, query.as_deref()) {
        Ok(target) => state
            .gateway
            .call(&mut session.0, system, request(target))
            .await
            .map(Json)
            .map_err(AppError::from),
        Err(err) => Err(err),
    };
    session.respond(result)
}

/// Relative backend path for a captured tail. Dot segments, backslashes and
/// a scheme-like first segment are refused so a call can never leave the
/// backend's base path.
fn backend_path(tail: &str, query: Option<&str>) -> Result<String, AppError> {
    let tail = tail.trim_start_matches('/');
    let first = tail.split('/').next().unwrap_or_default();
    if first.contains(':')
        || tail.contains('\\')
        || tail
            .split('/')
            .any(|segment| segment == ".." || segment == ".")
    {
        return Err(AppError::InvalidPath(tail.to_string()));
    }

    Ok(match query {
        Some(query) if !query.is_empty() => format!("/{tail}?{query}"),
        _ => format!("/{tail}"),
    })
}
