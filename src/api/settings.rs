/// Key/value settings endpoints

use crate::api::{error::ApiError, AppState};
use crate::settings::Setting;
use crate::tenant::TenantKey;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

pub fn create_settings_routes() -> Router<AppState> {
    Router::new().route("/settings/{key}", get(get_setting).put(put_setting))
}

fn setting_key(raw: &str) -> Result<&str, ApiError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ApiError::Validation("Invalid setting key.".to_string()));
    }
    Ok(key)
}

/// GET /settings/{key}
async fn get_setting(
    State(state): State<AppState>,
    tenant: TenantKey,
    Path(key): Path<String>,
) -> Result<Json<Setting>, ApiError> {
    let key = setting_key(&key)?;
    match state.settings.get(&tenant, key).await? {
        Some(setting) => Ok(Json(setting)),
        None => Err(ApiError::NotFound(format!("Setting '{}' not found", key))),
    }
}

/// PUT /settings/{key}
/// Body: { "value": "<string>" }
async fn put_setting(
    State(state): State<AppState>,
    tenant: TenantKey,
    Path(key): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Setting>, ApiError> {
    let key = setting_key(&key)?;
    let Json(body) = payload?;
    let value = body
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Validation("Setting value must be a string.".to_string()))?;

    let setting = state.settings.put(&tenant, key, value).await?;
    Ok(Json(setting))
}
