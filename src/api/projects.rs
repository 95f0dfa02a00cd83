/// Portfolio catalog endpoints
///
/// All routes are tenant-scoped through the `TenantKey` extractor.

use crate::api::{error::ApiError, AppState};
use crate::projects::{Category, ProjectDetail, ProjectFilter, ProjectListItem};
use crate::tenant::TenantKey;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

/// Query string for the project listing
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    /// Category slug to filter on
    pub category: Option<String>,
    /// Only the literal "true" enables the featured filter
    pub featured: Option<String>,
}

impl From<ProjectQuery> for ProjectFilter {
    fn from(query: ProjectQuery) -> Self {
        ProjectFilter {
            category_slug: query.category.filter(|c| !c.trim().is_empty()),
            featured: (query.featured.as_deref() == Some("true")).then_some(true),
            status: None,
        }
    }
}

pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/categories", get(list_categories))
        .route("/api/projects/{slug}", get(get_project))
}

/// GET /api/projects/categories
async fn list_categories(
    State(state): State<AppState>,
    tenant: TenantKey,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.projects.list_categories(&tenant).await?;
    Ok(Json(categories))
}

/// GET /api/projects?category=<slug>&featured=true
async fn list_projects(
    State(state): State<AppState>,
    tenant: TenantKey,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<ProjectListItem>>, ApiError> {
    let filter = ProjectFilter::from(query);
    tracing::debug!("📋 Listing projects for '{}' with {:?}", tenant, filter);
    let projects = state.projects.list_projects(&tenant, filter).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{slug}
async fn get_project(
    State(state): State<AppState>,
    tenant: TenantKey,
    Path(slug): Path<String>,
) -> Result<Json<ProjectDetail>, ApiError> {
    match state.projects.get_project_by_slug(&tenant, &slug).await? {
        Some(project) => Ok(Json(project)),
        None => Err(ApiError::NotFound("Project not found".to_string())),
    }
}
