use std::fmt;

use crate::models::DashboardRole;

/// The resources the portal screens read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AboutTopics,
    Programs,
    Events,
    News,
    Institutions,
    Dashboard(DashboardRole),
}

impl Endpoint {
    /// Path relative to the configured base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::AboutTopics => "/about".to_string(),
            Endpoint::Programs => "/programs".to_string(),
            Endpoint::Events => "/events".to_string(),
            Endpoint::News => "/news".to_string(),
            Endpoint::Institutions => "/institutions".to_string(),
            Endpoint::Dashboard(role) => format!("/dashboard/{}", role.as_str()),
        }
    }

    /// Stable name for logs, error contexts and screen keys.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::AboutTopics => "about_topics",
            Endpoint::Programs => "programs",
            Endpoint::Events => "events",
            Endpoint::News => "news",
            Endpoint::Institutions => "institutions",
            Endpoint::Dashboard(DashboardRole::Student) => "student_dashboard",
            Endpoint::Dashboard(DashboardRole::Parent) => "parent_dashboard",
            Endpoint::Dashboard(DashboardRole::Lecturer) => "lecturer_dashboard",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
