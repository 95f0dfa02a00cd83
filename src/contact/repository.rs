/// Contact message persistence
///
/// Writes provision the tenant's contact table in the same transaction, so a
/// tenant's first submission creates its storage.

use crate::contact::types::NewContactMessage;
use crate::tenant::{TenantExecutor, TenantKey};
use anyhow::Result;

/// Contact table; the CHECKs keep exactly one channel field per method
pub const CONTACT_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS contact_messages (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        contact_method VARCHAR(20) NOT NULL,
        phone TEXT,
        discord TEXT,
        message TEXT NOT NULL,
        page_url TEXT,
        user_agent TEXT,
        ip TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT contact_messages_method_chk CHECK (contact_method IN ('whatsapp', 'discord')),
        CONSTRAINT contact_messages_method_fields_chk CHECK (
            (contact_method = 'whatsapp' AND phone IS NOT NULL AND length(trim(phone)) > 0
                AND (discord IS NULL OR length(trim(discord)) = 0))
            OR
            (contact_method = 'discord' AND discord IS NOT NULL AND length(trim(discord)) > 0
                AND (phone IS NULL OR length(trim(phone)) = 0))
        )
    );

    CREATE INDEX IF NOT EXISTS idx_contact_messages_created_at ON contact_messages(created_at DESC);
    CREATE INDEX IF NOT EXISTS idx_contact_messages_email ON contact_messages(email);
"#;

#[derive(Debug, Clone)]
pub struct ContactRepository {
    executor: TenantExecutor,
}

impl ContactRepository {
    pub fn new(executor: TenantExecutor) -> Self {
        Self { executor }
    }

    /// Store a validated message and return its generated id
    pub async fn create_message(&self, key: &TenantKey, input: NewContactMessage) -> Result<String> {
        self.executor
            .with_tenant(key, move |scope| {
                Box::pin(async move {
                    scope.ensure_schema().await?;
                    scope.execute_ddl(CONTACT_DDL).await?;

                    let id = sqlx::query_scalar::<_, String>(
                        r#"
                        INSERT INTO contact_messages (
                            name, email, contact_method, phone, discord, message, page_url, user_agent, ip
                        )
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                        RETURNING id::text
                        "#,
                    )
                    .bind(&input.name)
                    .bind(&input.email)
                    .bind(input.contact_method.as_str())
                    .bind(&input.phone)
                    .bind(&input.discord)
                    .bind(&input.message)
                    .bind(&input.page_url)
                    .bind(&input.user_agent)
                    .bind(&input.ip)
                    .fetch_one(scope.conn())
                    .await?;

                    Ok::<_, anyhow::Error>(id)
                })
            })
            .await
    }
}
