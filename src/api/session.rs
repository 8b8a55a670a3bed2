use axum::{extract::State, response::Json, Extension};

use super::AppState;
use crate::auth::UserSession;
use crate::errors::AppResult;
use crate::models::UserProfile;

/// Called by the client right after the identity provider signs the user in
pub async fn sign_in(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.users.ensure_profile(&session).await?;
    Ok(Json(profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.users.get_profile(session.user_id).await?;
    Ok(Json(profile))
}
