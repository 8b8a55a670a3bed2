use axum::{extract::State, response::Json, Extension};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::AppResult;
use crate::models::RecommendationSet;

pub async fn generate(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<RecommendationSet>> {
    Ok(Json(state.recommendations.recommend(session.user_id).await?))
}
