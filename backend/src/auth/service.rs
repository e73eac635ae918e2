//! Core business logic for the session layer.
//!
//! `SessionService` is the single interface through which the portal reads
//! and writes the browser-persisted session: token, role and user id lookups,
//! the authentication predicate, establishing a session after login and
//! invalidating it on logout or on a backend authentication failure.

use adapters::{LoginResponse, SessionStore, ROLE_KEYS, TOKEN_KEY, USER_ID_KEY};
use tracing::info;

use super::models::{SessionSummary, UserRole};
use crate::router::System;

#[derive(Debug, Clone)]
pub struct SessionService<S> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Reads the role from the first legacy key present and normalizes it.
    pub fn get_user_role(&self) -> Option<UserRole> {
        ROLE_KEYS
            .iter()
            .find_map(|key| self.read(key))
            .and_then(|raw| UserRole::normalize(&raw))
    }

    pub fn get_user_id(&self) -> Option<String> {
        self.read(USER_ID_KEY)
    }

    /// A token without a role (or the reverse) is not a session.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some() && self.get_user_role().is_some()
    }

    pub fn summary(&self) -> SessionSummary {
        let role = self.get_user_role();
        SessionSummary {
            authenticated: self.get_token().is_some() && role.is_some(),
            role,
            user_id: self.get_user_id(),
        }
    }

    /// Writes the session returned by a successful login.
    pub fn establish(&mut self, login: &LoginResponse) {
        self.store.set(TOKEN_KEY, &login.token);
        self.store.set(ROLE_KEYS[0], &login.role);
        for legacy in &ROLE_KEYS[1..] {
            self.store.remove(legacy);
        }
        self.store.set(USER_ID_KEY, &login.user_id);
    }

    /// Clears the whole store.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Clears the whole store and returns the login route of `system`.
    pub fn invalidate(&mut self, system: System) -> &'static str {
        info!(system = system.as_str(), "invalidating session");
        self.clear();
        system.login_path()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.trim().is_empty())
    }
}
