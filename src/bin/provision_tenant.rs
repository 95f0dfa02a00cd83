/// One-time tenant provisioning
///
/// Usage: provision-tenant [client-key]
/// Falls back to DEFAULT_CLIENT_KEY, then "default". Creates the tenant schema and
/// every table, then prints row counts read through the tenant search path.

use anyhow::Result;
use portfolio_api::{config::Config, provision::provision_tenant, server::init_tracing, AppState, TenantKey};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let raw_key = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEFAULT_CLIENT_KEY").ok())
        .unwrap_or_else(|| "default".to_string());
    let key = TenantKey::new(&raw_key).ok_or_else(|| anyhow::anyhow!("Client key must not be blank"))?;

    let config = Config::from_env();
    let state = AppState::from_config(&config)?;

    let schema = provision_tenant(&state.executor, &key).await?;
    println!("✅ Schema {} created/verified", schema);

    let (categories, projects, messages) = state
        .executor
        .with_tenant(&key, |scope| {
            Box::pin(async move {
                let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
                    .fetch_one(scope.conn())
                    .await?;
                let projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
                    .fetch_one(scope.conn())
                    .await?;
                let messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
                    .fetch_one(scope.conn())
                    .await?;
                Ok::<_, anyhow::Error>((categories, projects, messages))
            })
        })
        .await?;

    println!("\n📊 Database stats for {}:", schema);
    println!("  Categories: {}", categories);
    println!("  Projects: {}", projects);
    println!("  Contact messages: {}", messages);

    let header = &config.tenant.header_name;
    println!("\n💡 Test the API:");
    println!("   curl -H \"{}: {}\" http://localhost:{}/api/projects/categories", header, key, config.server.port);
    println!("   curl -H \"{}: {}\" http://localhost:{}/api/projects", header, key, config.server.port);

    state.executor.pool().close().await;
    Ok(())
}
