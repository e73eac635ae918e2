//! Per-student data provider.
//!
//! Mounted only for student routes so staff and admin pages never load
//! student-specific state. The profile fetch carries its own timeout instead
//! of the client-wide one.

use std::time::Duration;

use adapters::{RestRequest, SessionStore};
use serde_json::Value;

use super::rest_gateway::{GatewayError, RestGateway};
use crate::auth::{AuthError, Role, SessionService};
use crate::router::System;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDataProvider {
    user_id: String,
    timeout: Duration,
}

impl StudentDataProvider {
    /// Scopes a provider to a signed-in student with a usable id.
    pub fn for_session<S: SessionStore>(
        session: &SessionService<S>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        if !session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        if session.get_user_role().and_then(|role| role.canonical()) != Some(Role::Student) {
            return Err(AuthError::NotStudent);
        }
        let user_id = session
            .get_user_id()
            .filter(|id| is_path_segment(id))
            .ok_or(AuthError::MissingUserId)?;
        Ok(Self { user_id, timeout })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn profile_path(&self) -> String {
        format!("/students/{}/profile", self.user_id)
    }

    pub async fn load_profile<S: SessionStore>(
        &self,
        gateway: &RestGateway,
        session: &mut SessionService<S>,
        system: System,
    ) -> Result<Value, GatewayError> {
        let request = RestRequest::get(self.profile_path()).timeout(self.timeout);
        gateway.call(session, system, request).await
    }
}

/// Ids are spliced into backend paths, so only plain segments are accepted.
fn is_path_segment(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && id != "."
        && id != ".."
}
