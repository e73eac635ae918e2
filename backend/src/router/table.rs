//! The static route table of all three systems and its path matcher.
//!
//! The table is the portal's de facto configuration surface: every page path,
//! the roles it requires, the system layout it mounts into and the scoped
//! provider it needs are compiled in here.

use std::collections::BTreeMap;

use serde::Serialize;

use super::System;
use crate::auth::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No guard at all.
    Public,
    /// Any authenticated role.
    Authenticated,
    /// Authenticated with one of these roles.
    Roles(&'static [Role]),
}

/// Providers mounted only for the routes that ask for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScopedProvider {
    StudentData,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub access: Access,
    pub system: System,
    pub page: &'static str,
    pub scoped: Option<ScopedProvider>,
}

const ADMIN: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Staff];
const STUDENT: &[Role] = &[Role::Student];
const ADMIN_STAFF: &[Role] = &[Role::Admin, Role::Staff];
const STAFF_STUDENT: &[Role] = &[Role::Staff, Role::Student];

const fn route(path: &'static str, access: Access, page: &'static str) -> RouteDescriptor {
    RouteDescriptor {
        path,
        access,
        system: system_of(path),
        page,
        scoped: None,
    }
}

const fn student_route(path: &'static str, page: &'static str) -> RouteDescriptor {
    RouteDescriptor {
        scoped: Some(ScopedProvider::StudentData),
        ..route(path, Access::Roles(STUDENT), page)
    }
}

const fn system_of(path: &'static str) -> System {
    let bytes = path.as_bytes();
    if starts_with(bytes, b"/placement/") {
        System::Placement
    } else if starts_with(bytes, b"/records/") {
        System::Records
    } else {
        System::Main
    }
}

const fn starts_with(bytes: &[u8], prefix: &[u8]) -> bool {
    if bytes.len() < prefix.len() {
        return false;
    }
    let mut i = 0;
    while i < prefix.len() {
        if bytes[i] != prefix[i] {
            return false;
        }
        i += 1;
    }
    true
}

pub static ROUTES: &[RouteDescriptor] = &[
    // main
    route("/", Access::Public, "Home"),
    route("/about", Access::Public, "About"),
    route("/academics", Access::Public, "Academics"),
    route("/admissions", Access::Public, "Admissions"),
    route("/departments", Access::Public, "Departments"),
    route("/departments/:slug", Access::Public, "DepartmentDetail"),
    route("/facilities", Access::Public, "Facilities"),
    route("/placements", Access::Public, "PlacementHighlights"),
    route("/gallery", Access::Public, "Gallery"),
    route("/contact", Access::Public, "Contact"),
    // placement
    route("/placement/login", Access::Public, "PlacementLogin"),
    route("/placement/admin-home", Access::Roles(ADMIN), "AdminHome"),
    route("/placement/staff-home", Access::Roles(STAFF), "StaffHome"),
    route("/placement/student-home", Access::Roles(STUDENT), "StudentHome"),
    route("/placement/companies", Access::Roles(ADMIN_STAFF), "CompanyList"),
    route("/placement/companies/new", Access::Roles(ADMIN), "AddCompany"),
    route("/placement/drives", Access::Authenticated, "DriveList"),
    route("/placement/drives/:id", Access::Authenticated, "DriveDetail"),
    route("/placement/eligible-drives", Access::Roles(STUDENT), "EligibleDrives"),
    route("/placement/applications", Access::Roles(STUDENT), "MyApplications"),
    route("/placement/students", Access::Roles(ADMIN_STAFF), "PlacementStudents"),
    route("/placement/feedback", Access::Roles(STUDENT), "Feedback"),
    route("/placement/reports", Access::Roles(ADMIN), "PlacementReports"),
    // records
    route("/records/login", Access::Public, "RecordsLogin"),
    route("/records/reset-password", Access::Public, "ResetPassword"),
    route("/records/dashboard", Access::Authenticated, "Dashboard"),
    route("/records/student-list", Access::Roles(ADMIN), "StudentList"),
    route("/records/staff-list", Access::Roles(ADMIN), "StaffList"),
    route("/records/students/:id", Access::Roles(ADMIN_STAFF), "StudentDetail"),
    route("/records/events", Access::Authenticated, "Events"),
    route("/records/achievements", Access::Roles(STAFF_STUDENT), "Achievements"),
    route("/records/leave", Access::Roles(STAFF_STUDENT), "LeaveRequests"),
    route("/records/leave/approvals", Access::Roles(ADMIN), "LeaveApprovals"),
    student_route("/records/profile", "StudentProfile"),
    student_route("/records/academic-history", "AcademicHistory"),
    student_route("/records/certifications", "Certifications"),
    student_route("/records/scholarships", "Scholarships"),
    student_route("/records/internships", "Internships"),
];

/// A route table hit, with the values bound to its `:param` segments.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: &'static RouteDescriptor,
    /// The request path with empty segments and the trailing slash removed.
    pub path: String,
    pub params: BTreeMap<&'static str, String>,
}

/// Finds the route for `path`. Static segments win over parameters, so
/// `/placement/companies/new` never binds as a company id.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let segments = split(path);
    let canonical = format!("/{}", segments.join("/"));

    let mut best: Option<(usize, RouteMatch)> = None;
    for route in ROUTES {
        let Some(params) = bind(route.path, &segments) else {
            continue;
        };
        let static_segments = split(route.path).len() - params.len();
        if best
            .as_ref()
            .map_or(true, |(score, _)| static_segments > *score)
        {
            best = Some((
                static_segments,
                RouteMatch {
                    route,
                    path: canonical.clone(),
                    params,
                },
            ));
        }
    }

    best.map(|(_, hit)| hit)
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn bind(pattern: &'static str, segments: &[&str]) -> Option<BTreeMap<&'static str, String>> {
    let pattern = split(pattern);
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern.into_iter().zip(segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name, (*actual).to_string());
            }
            None if expected == *actual => {}
            None => return None,
        }
    }
    Some(params)
}
