/// Key/value settings per tenant

use crate::tenant::{TenantExecutor, TenantKey};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SETTINGS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS app_settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    executor: TenantExecutor,
}

impl SettingsRepository {
    pub fn new(executor: TenantExecutor) -> Self {
        Self { executor }
    }

    /// Read one setting; `None` when unset or the tenant has no settings table yet
    pub async fn get(&self, tenant: &TenantKey, key: &str) -> Result<Option<Setting>> {
        let key = key.to_string();

        self.executor
            .with_tenant(tenant, move |scope| {
                Box::pin(async move {
                    if !scope.relation_exists("app_settings").await? {
                        return Ok(None);
                    }

                    let setting = sqlx::query_as::<_, Setting>(
                        "SELECT key, value, updated_at FROM app_settings WHERE key = $1",
                    )
                    .bind(&key)
                    .fetch_optional(scope.conn())
                    .await?;

                    Ok::<_, anyhow::Error>(setting)
                })
            })
            .await
    }

    /// Upsert a setting, refreshing `updated_at`
    pub async fn put(&self, tenant: &TenantKey, key: &str, value: &str) -> Result<Setting> {
        let key = key.to_string();
        let value = value.to_string();

        self.executor
            .with_tenant(tenant, move |scope| {
                Box::pin(async move {
                    scope.ensure_schema().await?;
                    scope.execute_ddl(SETTINGS_DDL).await?;

                    let setting = sqlx::query_as::<_, Setting>(
                        r#"
                        INSERT INTO app_settings (key, value, updated_at)
                        VALUES ($1, $2, NOW())
                        ON CONFLICT (key)
                        DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                        RETURNING key, value, updated_at
                        "#,
                    )
                    .bind(&key)
                    .bind(&value)
                    .fetch_one(scope.conn())
                    .await?;

                    Ok::<_, anyhow::Error>(setting)
                })
            })
            .await
    }
}
