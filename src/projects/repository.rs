/// Portfolio catalog persistence
///
/// All queries are unqualified and resolve through the tenant search path pinned by
/// `TenantExecutor`. Read paths never run DDL: a tenant whose tables do not exist
/// yet simply has no rows.

use crate::projects::types::{
    Category, CategorySummary, Project, ProjectDetail, ProjectFilter, ProjectImage, ProjectListItem,
    ProjectStat,
};
use crate::tenant::{TenantExecutor, TenantKey};
use anyhow::Result;

/// Tables, indexes and `updated_at` triggers for the catalog
pub const PROJECTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        slug VARCHAR(50) UNIQUE NOT NULL,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        title VARCHAR(200) NOT NULL,
        slug VARCHAR(200) UNIQUE NOT NULL,
        description TEXT NOT NULL,
        content TEXT,
        tags TEXT[],
        client_name VARCHAR(200),
        project_url VARCHAR(500),
        completion_date DATE,
        status VARCHAR(20) NOT NULL DEFAULT 'published',
        featured BOOLEAN NOT NULL DEFAULT FALSE,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT projects_status_chk CHECK (status IN ('draft', 'published', 'archived'))
    );

    CREATE TABLE IF NOT EXISTS project_images (
        id SERIAL PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        url VARCHAR(500) NOT NULL,
        alt_text VARCHAR(200),
        caption TEXT,
        is_thumbnail BOOLEAN NOT NULL DEFAULT FALSE,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS project_stats (
        id SERIAL PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        label VARCHAR(100) NOT NULL,
        value VARCHAR(50) NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_projects_category ON projects(category_id);
    CREATE INDEX IF NOT EXISTS idx_projects_status ON projects(status);
    CREATE INDEX IF NOT EXISTS idx_projects_featured ON projects(featured);
    CREATE INDEX IF NOT EXISTS idx_project_images_project ON project_images(project_id);
    CREATE INDEX IF NOT EXISTS idx_project_stats_project ON project_stats(project_id);

    CREATE OR REPLACE FUNCTION update_updated_at_column()
    RETURNS TRIGGER AS $$
    BEGIN
        NEW.updated_at = NOW();
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql;

    DROP TRIGGER IF EXISTS update_categories_updated_at ON categories;
    CREATE TRIGGER update_categories_updated_at
        BEFORE UPDATE ON categories
        FOR EACH ROW
        EXECUTE FUNCTION update_updated_at_column();

    DROP TRIGGER IF EXISTS update_projects_updated_at ON projects;
    CREATE TRIGGER update_projects_updated_at
        BEFORE UPDATE ON projects
        FOR EACH ROW
        EXECUTE FUNCTION update_updated_at_column();
"#;

const LIST_PROJECTS_SQL: &str = r#"
    SELECT
        p.id,
        p.title,
        p.slug,
        p.description,
        p.tags,
        p.featured,
        json_build_object('id', c.id, 'slug', c.slug, 'name', c.name) AS category,
        (
            SELECT url FROM project_images
            WHERE project_id = p.id AND is_thumbnail = TRUE
            ORDER BY sort_order
            LIMIT 1
        ) AS thumbnail,
        COALESCE(
            (
                SELECT json_agg(json_build_object('label', ps.label, 'value', ps.value) ORDER BY ps.sort_order)
                FROM project_stats ps
                WHERE ps.project_id = p.id
            ),
            '[]'::json
        ) AS stats
    FROM projects p
    INNER JOIN categories c ON p.category_id = c.id
    WHERE p.status = $1
      AND ($2::text IS NULL OR c.slug = $2)
      AND ($3::boolean IS NULL OR p.featured = $3)
    ORDER BY p.featured DESC, p.sort_order ASC, p.created_at DESC
"#;

const PROJECT_BY_SLUG_SQL: &str = r#"
    SELECT
        p.*,
        json_build_object('id', c.id, 'slug', c.slug, 'name', c.name, 'description', c.description) AS category
    FROM projects p
    INNER JOIN categories c ON p.category_id = c.id
    WHERE p.slug = $1 AND p.status = 'published'
"#;

#[derive(sqlx::FromRow)]
struct ProjectWithCategory {
    #[sqlx(flatten)]
    project: Project,
    #[sqlx(json)]
    category: CategorySummary,
}

/// Tenant-scoped catalog queries
#[derive(Debug, Clone)]
pub struct ProjectsRepository {
    executor: TenantExecutor,
}

impl ProjectsRepository {
    pub fn new(executor: TenantExecutor) -> Self {
        Self { executor }
    }

    /// Create the tenant schema and catalog tables
    pub async fn init_schema(&self, key: &TenantKey) -> Result<()> {
        self.executor.provision(key, &[PROJECTS_DDL]).await?;
        Ok(())
    }

    /// All categories ordered by name
    pub async fn list_categories(&self, key: &TenantKey) -> Result<Vec<Category>> {
        self.executor
            .with_tenant(key, |scope| {
                Box::pin(async move {
                    if !scope.relation_exists("categories").await? {
                        return Ok(Vec::new());
                    }

                    let categories = sqlx::query_as::<_, Category>(
                        "SELECT id, slug, name, description, created_at, updated_at FROM categories ORDER BY name",
                    )
                    .fetch_all(scope.conn())
                    .await?;

                    Ok::<_, anyhow::Error>(categories)
                })
            })
            .await
    }

    /// Project cards matching `filter`
    pub async fn list_projects(&self, key: &TenantKey, filter: ProjectFilter) -> Result<Vec<ProjectListItem>> {
        let status = filter.status.unwrap_or_default();

        self.executor
            .with_tenant(key, move |scope| {
                Box::pin(async move {
                    if !scope.relation_exists("projects").await? {
                        return Ok(Vec::new());
                    }

                    let projects = sqlx::query_as::<_, ProjectListItem>(LIST_PROJECTS_SQL)
                        .bind(status.as_str())
                        .bind(filter.category_slug)
                        .bind(filter.featured)
                        .fetch_all(scope.conn())
                        .await?;

                    Ok::<_, anyhow::Error>(projects)
                })
            })
            .await
    }

    /// Published project with its images and stats, `None` when absent
    pub async fn get_project_by_slug(&self, key: &TenantKey, slug: &str) -> Result<Option<ProjectDetail>> {
        let slug = slug.to_string();

        self.executor
            .with_tenant(key, move |scope| {
                Box::pin(async move {
                    if !scope.relation_exists("projects").await? {
                        return Ok(None);
                    }

                    let row = sqlx::query_as::<_, ProjectWithCategory>(PROJECT_BY_SLUG_SQL)
                        .bind(&slug)
                        .fetch_optional(scope.conn())
                        .await?;

                    let Some(ProjectWithCategory { project, category }) = row else {
                        return Ok(None);
                    };

                    let images = sqlx::query_as::<_, ProjectImage>(
                        r#"
                        SELECT id, project_id, url, alt_text, caption, is_thumbnail, sort_order, created_at
                        FROM project_images
                        WHERE project_id = $1
                        ORDER BY sort_order, created_at
                        "#,
                    )
                    .bind(project.id)
                    .fetch_all(scope.conn())
                    .await?;

                    let stats = sqlx::query_as::<_, ProjectStat>(
                        r#"
                        SELECT id, project_id, label, value, sort_order
                        FROM project_stats
                        WHERE project_id = $1
                        ORDER BY sort_order
                        "#,
                    )
                    .bind(project.id)
                    .fetch_all(scope.conn())
                    .await?;

                    Ok::<_, anyhow::Error>(Some(ProjectDetail {
                        project,
                        category,
                        images,
                        stats,
                    }))
                })
            })
            .await
    }
}
