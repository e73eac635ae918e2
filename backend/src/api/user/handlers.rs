//! Handler functions for the signed-in user's endpoints.
//!
//! Both require an authenticated session. The profile is student-only and is
//! fetched through the scoped student data provider with its own timeout.

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::auth::{AuthError, CallerSystem, PortalSession, SessionSummary};
use crate::errors::AppError;
use crate::services::StudentDataProvider;
use crate::state::AppState;

pub async fn current_user(session: PortalSession) -> Result<Json<SessionSummary>, AuthError> {
    if !session.is_authenticated() {
        return Err(AuthError::NotAuthenticated);
    }
    Ok(Json(session.summary()))
}

pub async fn student_profile(
    State(state): State<AppState>,
    CallerSystem(system): CallerSystem,
    mut session: PortalSession,
) -> Response {
    let provider = StudentDataProvider::for_session(&session.0, state.config.profile_timeout);

    let result = match provider {
        Ok(provider) => provider
            .load_profile(&state.gateway, &mut session.0, system)
            .await
            .map(Json)
            .map_err(AppError::from),
        Err(err) => Err(AppError::from(err)),
    };
    session.respond(result)
}
