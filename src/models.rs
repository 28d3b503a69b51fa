//! Payload types returned by the portal API.
//!
//! Fields the screens do not display are not modelled; unknown JSON keys
//! are ignored and optional fields default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An "about the university" topic (history, vision, leadership, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutTopic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// An academic program offered by a faculty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
}

/// A faculty, school or partner institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Whose dashboard to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardRole {
    Student,
    Parent,
    Lecturer,
}

impl DashboardRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardRole::Student => "student",
            DashboardRole::Parent => "parent",
            DashboardRole::Lecturer => "lecturer",
        }
    }
}

/// One labelled figure on a dashboard card ("Credits", "Attendance", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub items: Vec<DashboardItem>,
}
