//! Per-system layout wrappers and the navigation chrome they select.

use serde::Serialize;

use super::System;
use crate::auth::{Role, UserRole};

/// Records paths that never show the sidebar, signed in or not.
const SIDEBAR_FREE_PATHS: &[&str] = &["/records/login", "/records/reset-password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Navbar {
    AdminNavbar,
    StaffNavbar,
    StudentNavbar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sidebar {
    SuperAdminSidebar,
    DeptAdminSidebar,
    AdminSidebar,
    StaffSidebar,
    StudentSidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Chrome {
    /// College website header and footer.
    Site,
    Placement { navbar: Option<Navbar> },
    Records { sidebar: Option<Sidebar> },
}

impl Chrome {
    pub fn compose(system: System, path: &str, role: Option<&UserRole>) -> Self {
        let role = role.and_then(UserRole::canonical);
        match system {
            System::Main => Self::Site,
            System::Placement => Self::Placement {
                navbar: placement_navbar(role),
            },
            System::Records => Self::Records {
                sidebar: records_sidebar(path, role),
            },
        }
    }

    pub fn navbar(&self) -> Option<Navbar> {
        match self {
            Self::Placement { navbar } => *navbar,
            _ => None,
        }
    }

    pub fn sidebar(&self) -> Option<Sidebar> {
        match self {
            Self::Records { sidebar } => *sidebar,
            _ => None,
        }
    }
}

fn placement_navbar(role: Option<Role>) -> Option<Navbar> {
    match role? {
        Role::Admin => Some(Navbar::AdminNavbar),
        Role::Staff => Some(Navbar::StaffNavbar),
        Role::Student => Some(Navbar::StudentNavbar),
        Role::SuperAdmin | Role::DeptAdmin => None,
    }
}

fn records_sidebar(path: &str, role: Option<Role>) -> Option<Sidebar> {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        other => other,
    };
    if SIDEBAR_FREE_PATHS.iter().any(|free| *free == trimmed) {
        return None;
    }

    Some(match role? {
        Role::SuperAdmin => Sidebar::SuperAdminSidebar,
        Role::DeptAdmin => Sidebar::DeptAdminSidebar,
        Role::Admin => Sidebar::AdminSidebar,
        Role::Staff => Sidebar::StaffSidebar,
        Role::Student => Sidebar::StudentSidebar,
    })
}
