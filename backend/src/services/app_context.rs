//! Application-wide domain providers.
//!
//! `AppContext` is built once at startup and shared by reference with every
//! request. It mounts every domain provider unconditionally, so any page may
//! assume all of them are available regardless of system or role.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use adapters::{RestRequest, SessionStore};
use serde::Serialize;
use serde_json::Value;

use super::rest_gateway::{GatewayError, RestGateway};
use crate::auth::SessionService;
use crate::router::System;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Courses,
    Departments,
    Faculty,
    Events,
    Achievements,
    Leave,
    Scholarships,
    Certifications,
    Internships,
    Publications,
    Placements,
    Companies,
    Drives,
    Feedback,
    Notices,
    Timetable,
    Attendance,
    Fees,
    Hostel,
    Library,
}

impl Domain {
    pub const ALL: [Domain; 20] = [
        Self::Courses,
        Self::Departments,
        Self::Faculty,
        Self::Events,
        Self::Achievements,
        Self::Leave,
        Self::Scholarships,
        Self::Certifications,
        Self::Internships,
        Self::Publications,
        Self::Placements,
        Self::Companies,
        Self::Drives,
        Self::Feedback,
        Self::Notices,
        Self::Timetable,
        Self::Attendance,
        Self::Fees,
        Self::Hostel,
        Self::Library,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Departments => "departments",
            Self::Faculty => "faculty",
            Self::Events => "events",
            Self::Achievements => "achievements",
            Self::Leave => "leave",
            Self::Scholarships => "scholarships",
            Self::Certifications => "certifications",
            Self::Internships => "internships",
            Self::Publications => "publications",
            Self::Placements => "placements",
            Self::Companies => "companies",
            Self::Drives => "drives",
            Self::Feedback => "feedback",
            Self::Notices => "notices",
            Self::Timetable => "timetable",
            Self::Attendance => "attendance",
            Self::Fees => "fees",
            Self::Hostel => "hostel",
            Self::Library => "library",
        }
    }

    /// Name of the provider as listed in page views.
    pub const fn provider_name(self) -> &'static str {
        match self {
            Self::Courses => "CourseProvider",
            Self::Departments => "DepartmentProvider",
            Self::Faculty => "FacultyProvider",
            Self::Events => "EventProvider",
            Self::Achievements => "AchievementProvider",
            Self::Leave => "LeaveProvider",
            Self::Scholarships => "ScholarshipProvider",
            Self::Certifications => "CertificationProvider",
            Self::Internships => "InternshipProvider",
            Self::Publications => "PublicationProvider",
            Self::Placements => "PlacementProvider",
            Self::Companies => "CompanyProvider",
            Self::Drives => "DriveProvider",
            Self::Feedback => "FeedbackProvider",
            Self::Notices => "NoticeProvider",
            Self::Timetable => "TimetableProvider",
            Self::Attendance => "AttendanceProvider",
            Self::Fees => "FeeProvider",
            Self::Hostel => "HostelProvider",
            Self::Library => "LibraryProvider",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDomain(pub String);

impl fmt::Display for UnknownDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown domain: {}", self.0)
    }
}

impl std::error::Error for UnknownDomain {}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// Supplies one domain's data to the pages below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainProvider {
    domain: Domain,
    endpoint: String,
}

impl DomainProvider {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            endpoint: format!("/{}", domain.as_str()),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the domain's data through the gateway, on behalf of `session`.
    pub async fn load<S: SessionStore>(
        &self,
        gateway: &RestGateway,
        session: &mut SessionService<S>,
        system: System,
    ) -> Result<Value, GatewayError> {
        gateway
            .call(session, system, RestRequest::get(self.endpoint.clone()))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct AppContext {
    providers: BTreeMap<Domain, DomainProvider>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext {
    /// Mounts every domain provider.
    pub fn new() -> Self {
        let providers = Domain::ALL
            .into_iter()
            .map(|domain| (domain, DomainProvider::new(domain)))
            .collect();
        Self { providers }
    }

    pub fn provider(&self, domain: Domain) -> Option<&DomainProvider> {
        self.providers.get(&domain)
    }

    pub fn providers(&self) -> impl Iterator<Item = &DomainProvider> {
        self.providers.values()
    }

    /// Provider names, in a stable order, for page views.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers
            .keys()
            .map(|domain| domain.provider_name())
            .collect()
    }
}
