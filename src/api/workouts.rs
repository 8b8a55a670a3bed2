use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::AppResult;
use crate::models::{CompleteExerciseRequest, ExerciseLog, WorkoutDay};

pub async fn open_day(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(day): Path<String>,
) -> AppResult<Json<WorkoutDay>> {
    Ok(Json(state.workouts.open_day(session.user_id, &day).await?))
}

pub async fn complete_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(day): Path<String>,
    Json(request): Json<CompleteExerciseRequest>,
) -> AppResult<(StatusCode, Json<ExerciseLog>)> {
    let log = state
        .workouts
        .complete_exercise(session.user_id, &day, request)
        .await?;

    Ok((StatusCode::CREATED, Json(log)))
}
