use axum::{
    extract::{Query, State},
    response::Json,
    Extension,
};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::AppResult;
use crate::models::{ProgressQuery, ProgressSeries};

pub async fn list_exercises(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.progress.exercise_names(session.user_id).await?))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<ProgressSeries>> {
    let series = state
        .progress
        .series(session.user_id, query.exercise.as_deref())
        .await?;

    Ok(Json(series))
}
