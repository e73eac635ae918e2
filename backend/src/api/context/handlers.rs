//! Handler functions for the application context providers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::auth::{CallerSystem, PortalSession};
use crate::errors::AppError;
use crate::services::{Domain, UnknownDomain};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProviderEntry {
    pub domain: Domain,
    pub provider: &'static str,
    pub endpoint: String,
}

pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderEntry>> {
    let entries = state
        .context
        .providers()
        .map(|provider| ProviderEntry {
            domain: provider.domain(),
            provider: provider.domain().provider_name(),
            endpoint: provider.endpoint().to_string(),
        })
        .collect();
    Json(entries)
}

pub async fn load_provider(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    mut session: PortalSession,
    Path(domain): Path<String>,
) -> Response {
    let provider = domain
        .parse::<Domain>()
        .ok()
        .and_then(|parsed| state.context.provider(parsed))
        .ok_or_else(|| AppError::from(UnknownDomain(domain)));

    let result = match provider {
        Ok(provider) => provider
            .load(&state.gateway, &mut session.0, system)
            .await
            .map(Json)
            .map_err(AppError::from),
        Err(err) => Err(err),
    };
    session.respond(result)
}
