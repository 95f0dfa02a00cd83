/// Portfolio catalog row types
///
/// Rows live in each tenant's schema; see `repository::PROJECTS_DDL` for the layout.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a project, mirrored by a CHECK constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    #[default]
    Published,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Published => "published",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown project status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "published" => Ok(ProjectStatus::Published),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Project grouping (e.g. "landing-pages", "e-commerce")
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category as embedded in project payloads
///
/// Listings carry id/slug/name; the detail view adds the description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i32,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A portfolio entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub client_name: Option<String>,
    pub project_url: Option<String>,
    pub completion_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectImage {
    pub id: i32,
    pub project_id: i32,
    pub url: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub is_thumbnail: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Headline metric shown on a project card ("+40%" / "conversion")
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectStat {
    pub id: i32,
    pub project_id: i32,
    pub label: String,
    pub value: String,
    pub sort_order: i32,
}

/// Stat as aggregated into listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSummary {
    pub label: String,
    pub value: String,
}

/// Card shape returned by the project listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectListItem {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    #[sqlx(json)]
    pub category: CategorySummary,
    pub thumbnail: Option<String>,
    #[sqlx(json)]
    pub stats: Vec<StatSummary>,
}

/// Full project view with its category, images and stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub category: CategorySummary,
    pub images: Vec<ProjectImage>,
    pub stats: Vec<ProjectStat>,
}

/// Listing filters; `status` defaults to published
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub category_slug: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
}
