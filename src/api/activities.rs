use axum::{extract::State, http::StatusCode, response::Json, Extension};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::AppResult;
use crate::models::{ExtraActivity, LogActivityRequest};

pub async fn log_activity(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<LogActivityRequest>,
) -> AppResult<(StatusCode, Json<ExtraActivity>)> {
    let activity = state.activities.log_activity(session.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn list_activities(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<ExtraActivity>>> {
    Ok(Json(state.activities.list(session.user_id).await?))
}
