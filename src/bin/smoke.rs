/// Smoke check against a running server
///
/// Hits health, categories, projects and the first project detail with the tenant
/// header set. Exits non-zero on transport errors or any non-2xx status.
/// SMOKE_BASE_URL (default http://127.0.0.1:3000), DEFAULT_CLIENT_KEY (default "default").

use anyhow::{Context, Result};
use portfolio_api::config::Config;
use reqwest::StatusCode;
use serde_json::Value;

/// 1 for any non-2xx status, summed into the exit decision
fn failure(status: StatusCode) -> usize {
    usize::from(!status.is_success())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let base = std::env::var("SMOKE_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let key = std::env::var("DEFAULT_CLIENT_KEY").unwrap_or_else(|_| "default".to_string());
    let header = config.tenant.header_name.as_str();

    let client = reqwest::Client::new();
    let mut failures = 0;

    let health = client.get(format!("{}/health", base)).send().await.context("health request")?;
    failures += failure(health.status());
    println!("health {} {}", health.status(), health.text().await?);

    let categories = client
        .get(format!("{}/api/projects/categories", base))
        .header(header, &key)
        .send()
        .await
        .context("categories request")?;
    let status = categories.status();
    let body: Value = categories.json().await?;
    let slugs = body
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|c| c["slug"].as_str())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_else(|| "not_array".to_string());
    println!("categories {} {}", status, slugs);
    failures += failure(status);

    let projects = client
        .get(format!("{}/api/projects", base))
        .header(header, &key)
        .send()
        .await
        .context("projects request")?;
    let status = projects.status();
    let body: Value = projects.json().await?;
    let items = body.as_array().cloned().unwrap_or_default();
    println!("projects {} {}", status, items.len());
    failures += failure(status);

    if let Some(slug) = items.first().and_then(|p| p["slug"].as_str()) {
        let one = client
            .get(format!("{}/api/projects/{}", base, slug))
            .header(header, &key)
            .send()
            .await
            .context("project request")?;
        let status = one.status();
        let project: Value = one.json().await?;
        println!("project {} {}", status, project["slug"].as_str().unwrap_or("missing_slug"));
        failures += failure(status);
    }

    if failures > 0 {
        anyhow::bail!("smoke_failed: {} request(s) returned an error status", failures);
    }
    Ok(())
}
