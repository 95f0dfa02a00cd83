/// Tenant provisioning endpoint

use crate::api::{error::ApiError, AppState};
use crate::provision::provision_tenant;
use crate::tenant::TenantKey;
use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::{json, Value};

pub fn create_tenant_routes() -> Router<AppState> {
    Router::new().route("/api/tenant/provision", post(provision))
}

/// POST /api/tenant/provision
/// Returns: { "ok": true, "schema": "c_<key>" }
async fn provision(State(state): State<AppState>, tenant: TenantKey) -> Result<Json<Value>, ApiError> {
    let schema = provision_tenant(&state.executor, &tenant).await?;
    Ok(Json(json!({ "ok": true, "schema": schema })))
}
