use std::sync::Arc;

use axum::{
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::pageviewdb::PageViewExt, dtos::pageviewdtos::TrackViewDto, error::HttpError, AppState,
};

pub fn view_handler() -> Router {
    Router::new().route("/", post(track_view))
}

/// Fire-and-forget page-view recording. The write runs on its own task;
/// the response never waits for it and never reports its outcome, so
/// tracking can never degrade a page.
pub async fn track_view(
    Extension(app_state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<TrackViewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let visitor = body.visitor();
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .map(|ua| ua.to_string());

    let db_client = app_state.db_client.clone();
    tokio::spawn(async move {
        db_client
            .record_page_view(&body.path, &visitor, user_agent.as_deref())
            .await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "success" })),
    ))
}
