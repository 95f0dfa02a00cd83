/// Portfolio API: multi-tenant catalog and contact intake
///
/// Each request names a tenant through a client key header. The key maps to a
/// dedicated Postgres schema and every query runs in a transaction scoped to it.

// Core configuration and setup
pub mod config;

// Tenant isolation layer - key normalization, resolution, schema-scoped transactions
pub mod tenant;

// Domain repositories, all built on the tenant executor
pub mod projects;
pub mod contact;
pub mod settings;

// Explicit one-shot tenant provisioning
pub mod provision;

// HTTP API layer - routes, extractors and error responses
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use api::{ApiError, AppState};
pub use config::Config;
pub use server::{create_app, create_router, start_server};
pub use tenant::{SchemaName, SearchPath, TenantExecutor, TenantKey, TenantResolver, TenantScope};
