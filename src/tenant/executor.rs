/// Schema-scoped transaction executor
///
/// Every tenant query runs inside one transaction whose `search_path` is pinned to
/// `[tenant, extras.., public]`. The setting is transaction-local, so a pooled
/// connection never carries one tenant's path into the next checkout.

use crate::config::TenantConfig;
use crate::tenant::identifier::{parse_schema_list, SchemaName, SearchPath};
use crate::tenant::resolver::TenantKey;
use futures::future::BoxFuture;
use sqlx::postgres::{PgConnection, PgPool, Postgres};
use sqlx::Transaction;
use std::sync::Arc;

/// Runs units of work against a tenant's schema
///
/// Cheap to clone: the pool and the parsed extra schemas are shared.
#[derive(Debug, Clone)]
pub struct TenantExecutor {
    /// Process-wide connection pool shared by all tenants
    pool: PgPool,
    /// Schemas appended after the tenant schema, already normalized
    extra_schemas: Arc<Vec<SchemaName>>,
}

impl TenantExecutor {
    pub fn new(pool: PgPool, extra_schemas: Vec<SchemaName>) -> Self {
        Self {
            pool,
            extra_schemas: Arc::new(extra_schemas),
        }
    }

    /// Build from tenant configuration, parsing the extra schema list once
    pub fn from_config(pool: PgPool, config: &TenantConfig) -> Self {
        let extras = parse_schema_list(&config.extra_search_path_schemas);
        if !extras.is_empty() {
            tracing::info!(
                "🧭 Extra search path schemas: {}",
                extras.iter().map(SchemaName::as_str).collect::<Vec<_>>().join(", ")
            );
        }
        Self::new(pool, extras)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn extra_schemas(&self) -> &[SchemaName] {
        &self.extra_schemas
    }

    /// Effective search path for `key`
    pub fn search_path_for(&self, key: &TenantKey) -> SearchPath {
        SearchPath::compose(&SchemaName::for_tenant(key), &self.extra_schemas)
    }

    /// Run `work` in a transaction scoped to `key`'s schema
    ///
    /// Commits when `work` succeeds. On any failure the transaction is rolled back
    /// and the original error is returned; a failing rollback is only logged.
    /// The connection goes back to the pool when the scope is dropped.
    pub async fn with_tenant<T, E, F>(&self, key: &TenantKey, work: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut TenantScope) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<sqlx::Error> + Send,
    {
        let search_path = self.search_path_for(key);
        let tx = self.pool.begin().await?;
        let mut scope = TenantScope { tx, search_path };

        tracing::debug!("🔒 Tenant transaction opened: search_path={}", scope.search_path.to_setting());

        if let Err(e) = scope.pin_search_path().await {
            scope.rollback().await;
            return Err(e.into());
        }

        match work(&mut scope).await {
            Ok(value) => {
                scope.tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                scope.rollback().await;
                Err(e)
            }
        }
    }

    /// Create the tenant schema and run `statements` in one transaction
    ///
    /// Every statement must be idempotent (`IF NOT EXISTS`, `CREATE OR REPLACE`).
    pub async fn provision(&self, key: &TenantKey, statements: &[&'static str]) -> anyhow::Result<SchemaName> {
        let statements = statements.to_vec();
        let schema = self
            .with_tenant(key, move |scope| {
                Box::pin(async move {
                    scope.ensure_schema().await?;
                    for ddl in statements {
                        scope.execute_ddl(ddl).await?;
                    }
                    Ok::<_, anyhow::Error>(scope.schema().clone())
                })
            })
            .await?;

        tracing::info!("✅ Tenant schema provisioned: {}", schema);
        Ok(schema)
    }
}

/// Transaction-bound handle for one tenant
///
/// Only ever lent to a unit of work by [`TenantExecutor::with_tenant`]; it cannot
/// be built or kept outside that call.
pub struct TenantScope {
    tx: Transaction<'static, Postgres>,
    search_path: SearchPath,
}

impl TenantScope {
    /// Connection with the tenant search path pinned, for `sqlx::query*` executors
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Schema owning this tenant's tables
    pub fn schema(&self) -> &SchemaName {
        self.search_path.tenant()
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// `CREATE SCHEMA IF NOT EXISTS` for the tenant schema
    pub async fn ensure_schema(&mut self) -> Result<(), sqlx::Error> {
        let ddl = format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema().quoted());
        // Trait form: the boxed future is Send, which BoxFuture units of work require
        sqlx::Executor::execute(&mut *self.tx, sqlx::raw_sql(&ddl)).await?;
        Ok(())
    }

    /// Run a (possibly multi-statement) DDL script over the simple query protocol
    pub async fn execute_ddl(&mut self, ddl: &str) -> Result<(), sqlx::Error> {
        sqlx::Executor::execute(&mut *self.tx, sqlx::raw_sql(ddl)).await?;
        Ok(())
    }

    /// Whether `relation` resolves through the pinned search path
    pub async fn relation_exists(&mut self, relation: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
            .bind(relation)
            .fetch_one(&mut *self.tx)
            .await
    }

    async fn pin_search_path(&mut self) -> Result<(), sqlx::Error> {
        // is_local = true: same effect as SET LOCAL, reverted at COMMIT/ROLLBACK
        sqlx::query("SELECT set_config('search_path', $1, true)")
            .bind(self.search_path.to_setting())
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn rollback(self) {
        let schema = self.schema().clone();
        if let Err(e) = self.tx.rollback().await {
            tracing::warn!("⚠️ Rollback failed for tenant schema {} (original error kept): {}", schema, e);
        }
    }
}
