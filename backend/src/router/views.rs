//! View models returned by the page router.
//!
//! The front end renders these; the gateway only decides which one applies.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Chrome, RouteMatch, ScopedProvider, System};
use crate::auth::{Role, SessionSummary, UserRole};

/// A page mounted inside its system layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub system: System,
    pub path: String,
    pub page: &'static str,
    pub chrome: Chrome,
    pub params: BTreeMap<&'static str, String>,
    /// Application-wide providers, mounted for every page.
    pub providers: Vec<&'static str>,
    pub scoped_providers: Vec<ScopedProvider>,
    pub session: SessionSummary,
}

impl PageView {
    /// Composes the view from the canonical path of `hit`, so the chrome
    /// never depends on how the request spelled it.
    pub fn new(hit: &RouteMatch, providers: Vec<&'static str>, session: SessionSummary) -> Self {
        let route = hit.route;
        Self {
            system: route.system,
            path: hit.path.clone(),
            page: route.page,
            chrome: Chrome::compose(route.system, &hit.path, session.role.as_ref()),
            params: hit.params.clone(),
            providers,
            scoped_providers: route.scoped.into_iter().collect(),
            session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewAction {
    pub label: &'static str,
    pub method: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDeniedView {
    pub title: &'static str,
    pub current_role: Option<String>,
    pub required_roles: Vec<Role>,
    pub lines: Vec<String>,
    /// Clears the whole session and returns to the system login.
    pub action: ViewAction,
}

impl AccessDeniedView {
    pub fn new(system: System, current: Option<&UserRole>, required: &[Role]) -> Self {
        let current_role = current.map(|role| role.as_str().to_string());
        let required_list = required
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: "Access Denied",
            lines: vec![
                format!(
                    "Current role: {}",
                    current_role.as_deref().unwrap_or("none")
                ),
                format!("Required roles: {required_list}"),
            ],
            current_role,
            required_roles: required.to_vec(),
            action: ViewAction {
                label: "Back to login",
                method: "POST",
                href: format!("/auth/logout?system={}", system.as_str()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub title: &'static str,
    pub page: &'static str,
    pub path: String,
    pub chrome: Chrome,
}

impl NotFoundView {
    pub fn new(path: &str) -> Self {
        Self {
            title: "Page Not Found",
            page: "NotFound",
            path: path.to_string(),
            chrome: Chrome::Site,
        }
    }
}
