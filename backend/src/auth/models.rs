//! Data structures for authentication-related entities.
//!
//! This module defines the canonical roles, the normalization of raw role
//! strings read from the session store, the session snapshot handed to views,
//! and the login payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::router::System;

/// Canonical role names.
///
/// Route guards only ever name `Admin`, `Staff` and `Student`. The two admin
/// tiers are recognized so the records sidebar can switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
    Student,
    SuperAdmin,
    DeptAdmin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Student => "Student",
            Self::SuperAdmin => "SuperAdmin",
            Self::DeptAdmin => "DeptAdmin",
        }
    }

    /// Maps a folded synonym (lower case, separators stripped) to its role.
    fn from_folded(folded: &str) -> Option<Self> {
        let role = match folded {
            "admin" | "administrator" => Self::Admin,
            "staff" | "faculty" | "teacher" => Self::Staff,
            "student" => Self::Student,
            "superadmin" => Self::SuperAdmin,
            "deptadmin" | "departmentadmin" => Self::DeptAdmin,
            _ => return None,
        };
        Some(role)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role as read from the session store, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserRole {
    Canonical(Role),
    /// Unrecognized role, capitalized (first letter upper case, rest lower).
    Unrecognized(String),
}

impl UserRole {
    /// Normalizes a raw role string. Blank input is no role at all.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let folded: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Some(match Role::from_folded(&folded) {
            Some(role) => Self::Canonical(role),
            None => Self::Unrecognized(capitalize(trimmed)),
        })
    }

    pub fn canonical(&self) -> Option<Role> {
        match self {
            Self::Canonical(role) => Some(*role),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Canonical(role) => role.as_str(),
            Self::Unrecognized(name) => name,
        }
    }

    /// Membership test used by route guards. Unrecognized roles never match.
    pub fn is_one_of(&self, allowed: &[Role]) -> bool {
        self.canonical().is_some_and(|role| allowed.contains(&role))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Point-in-time view of the session, as exposed to handlers and clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub authenticated: bool,
    pub role: Option<UserRole>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// System whose login page submitted the form.
    #[serde(default)]
    pub system: System,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    #[serde(flatten)]
    pub session: SessionSummary,
    pub redirect: &'static str,
}
