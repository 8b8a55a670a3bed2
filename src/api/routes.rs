use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::plans::MAX_UPLOAD_BYTES;
use super::{activities, plans, progress, recommendations, session, workouts, AppState};
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer, JwtService};

pub fn create_routes(state: AppState, jwt_service: JwtService) -> Router {
    let api = Router::new()
        .route("/session", post(session::sign_in))
        .route("/profile", get(session::get_profile))
        .route("/plans", get(plans::list_plans))
        .route("/plans/active", get(plans::active_plan))
        .route(
            "/plans/import",
            post(plans::import_plan).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/workouts/:day", get(workouts::open_day))
        .route("/workouts/:day/complete", post(workouts::complete_exercise))
        .route("/progress", get(progress::get_progress))
        .route("/progress/exercises", get(progress::list_exercises))
        .route("/recommendations", post(recommendations::generate))
        .route(
            "/activities",
            get(activities::list_activities).post(activities::log_activity),
        )
        .route_layer(middleware::from_fn_with_state(jwt_service, jwt_auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
