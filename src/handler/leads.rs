use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    db::leaddb::LeadExt, dtos::leaddtos::CreateLeadDto, error::HttpError, AppState,
};

pub fn lead_handler() -> Router {
    Router::new().route("/", post(create_lead))
}

pub async fn create_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateLeadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // One insert, no automatic retry; the visitor resubmits on failure.
    let lead = app_state.db_client.create_lead(body).await.map_err(|e| {
        tracing::error!("failed to store lead: {e}");
        HttpError::server_error("Could not submit your inquiry, please try again")
    })?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Thanks for your interest, we will contact you soon",
        "data": {
            "lead_id": lead.id
        }
    })))
}
