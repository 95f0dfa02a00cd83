/// HTTP API Layer
///
/// REST endpoints for the portfolio catalog, contact intake, settings and tenant
/// provisioning. Every route below is tenant-scoped through the `TenantKey` extractor.

use crate::config::Config;
use crate::contact::ContactRepository;
use crate::projects::ProjectsRepository;
use crate::settings::SettingsRepository;
use crate::tenant::{TenantExecutor, TenantResolver};
use anyhow::Result;
use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

// Error taxonomy and JSON error bodies
pub mod error;

// TenantKey and ClientMeta extractors
pub mod extract;

pub mod contact;
pub mod projects;
pub mod settings;
pub mod tenant;

pub use contact::create_contact_routes;
pub use error::ApiError;
pub use projects::create_project_routes;
pub use settings::create_settings_routes;
pub use tenant::create_tenant_routes;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tenant header lookup
    pub resolver: TenantResolver,
    /// Shared scoped executor, used directly for provisioning
    pub executor: TenantExecutor,
    pub projects: ProjectsRepository,
    pub contact: ContactRepository,
    pub settings: SettingsRepository,
}

impl AppState {
    /// Wire repositories around one executor
    pub fn new(executor: TenantExecutor, resolver: TenantResolver) -> Self {
        Self {
            resolver,
            projects: ProjectsRepository::new(executor.clone()),
            contact: ContactRepository::new(executor.clone()),
            settings: SettingsRepository::new(executor.clone()),
            executor,
        }
    }

    /// Build state from configuration
    ///
    /// The pool is lazy: no connection is opened until the first tenant transaction.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pool = pool_options(&config.database)
            .connect_lazy(&config.database.url)
            .map_err(|e| anyhow::anyhow!("Invalid database configuration: {}", e))?;

        let executor = TenantExecutor::from_config(pool, &config.tenant);
        let resolver = TenantResolver::new(&config.tenant.header_name)?;

        Ok(Self::new(executor, resolver))
    }
}

/// Pool options for the shared tenant pool
///
/// Without a configured timeout, an exhausted pool makes callers wait instead of failing.
pub fn pool_options(database: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
}
