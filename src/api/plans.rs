use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    Extension,
};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::{AppError, AppResult};
use crate::models::{PlanSummary, TrainingPlan};
use crate::services::PlanUpload;

/// Largest spreadsheet accepted by the import endpoint
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart form with a `name` text field and a `file` field
#[tracing::instrument(skip(state, session, multipart), fields(user_id = %session.user_id))]
pub async fn import_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<PlanSummary>)> {
    let mut upload = PlanUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::FileRead(e.body_text()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => {
                let name = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid plan name: {}", e.body_text())))?;
                upload.name = Some(name);
            }
            "file" => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::FileRead(e.body_text()))?;
                upload.data = Some(data);
            }
            other => tracing::debug!(field = other, "ignoring unexpected form field"),
        }
    }

    let plan = state.plan_import.import_plan(session.user_id, upload).await?;
    Ok((StatusCode::CREATED, Json(PlanSummary::from(plan))))
}

pub async fn active_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<PlanSummary>> {
    Ok(Json(state.plans.active_plan(session.user_id).await?))
}

/// Every plan of the user, newest first
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<TrainingPlan>>> {
    Ok(Json(state.plans.history(session.user_id).await?))
}
