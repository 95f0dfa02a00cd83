/// Portfolio API server entry point
///
/// Loads `.env`, reads configuration once and starts the HTTP server:
/// - Catalog at /api/projects/*
/// - Contact intake at /api/contact
/// - Settings at /settings/{key}
/// - Health check at /health

use portfolio_api::{config::Config, server::start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; the environment may already be populated
    dotenv::dotenv().ok();

    let config = Config::from_env();

    start_server(config).await
}
