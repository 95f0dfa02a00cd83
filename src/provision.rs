/// Explicit tenant provisioning
///
/// Creates the tenant schema and every domain table in one transaction. Used by the
/// `provision-tenant` binary and the provisioning route; request read paths never
/// provision.

use crate::contact::CONTACT_DDL;
use crate::projects::PROJECTS_DDL;
use crate::settings::SETTINGS_DDL;
use crate::tenant::{SchemaName, TenantExecutor, TenantKey};
use anyhow::Result;

/// Every domain's DDL, in dependency order
pub const TENANT_DDL: &[&str] = &[PROJECTS_DDL, CONTACT_DDL, SETTINGS_DDL];

pub async fn provision_tenant(executor: &TenantExecutor, key: &TenantKey) -> Result<SchemaName> {
    tracing::info!("🏗️ Provisioning tenant schema for client key '{}'", key);
    executor.provision(key, TENANT_DDL).await
}
