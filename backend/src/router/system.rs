//! The three portal systems and the facts derived from a path prefix.

use serde::{Deserialize, Serialize};

use crate::auth::{Role, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    /// Public college website.
    #[default]
    Main,
    Placement,
    Records,
}

impl System {
    /// Derives the active system from a request path.
    pub fn from_path(path: &str) -> Self {
        if has_prefix(path, "/placement") {
            Self::Placement
        } else if has_prefix(path, "/records") {
            Self::Records
        } else {
            Self::Main
        }
    }

    pub const fn login_path(self) -> &'static str {
        match self {
            Self::Main => "/",
            Self::Placement => "/placement/login",
            Self::Records => "/records/login",
        }
    }

    /// Landing page after a successful login.
    pub fn home_for(self, role: Option<&UserRole>) -> &'static str {
        match (self, role.and_then(UserRole::canonical)) {
            (Self::Main, _) => "/",
            (Self::Placement, Some(Role::Admin)) => "/placement/admin-home",
            (Self::Placement, Some(Role::Staff)) => "/placement/staff-home",
            (Self::Placement, Some(Role::Student)) => "/placement/student-home",
            (Self::Placement, _) => "/placement/login",
            (Self::Records, _) => "/records/dashboard",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Placement => "placement",
            Self::Records => "records",
        }
    }
}

/// `/placement` and `/placement/...` match, `/placements` does not.
fn has_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
