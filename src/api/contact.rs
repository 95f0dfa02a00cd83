/// Contact form submission endpoint

use crate::api::{error::ApiError, AppState};
use crate::contact::{ClientMeta, ContactSubmission};
use crate::tenant::TenantKey;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};

pub fn create_contact_routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(create_message))
}

/// POST /api/contact
/// Body: { "name", "email", "message", "contact_method": "whatsapp"|"discord", "phone"?, "discord"?, "page_url"? }
/// Returns: { "ok": true, "id": "<generated id>" }
async fn create_message(
    State(state): State<AppState>,
    tenant: TenantKey,
    meta: ClientMeta,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(submission) = payload?;
    let message = submission.validate(meta)?;

    let id = state.contact.create_message(&tenant, message).await?;
    tracing::info!("📨 Contact message {} stored for '{}'", id, tenant);

    Ok(Json(json!({ "ok": true, "id": id })))
}
