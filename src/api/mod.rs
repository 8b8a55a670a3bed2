// API routes and handlers

pub mod activities;
pub mod health;
pub mod plans;
pub mod progress;
pub mod recommendations;
pub mod routes;
pub mod session;
pub mod workouts;

pub use routes::create_routes;

use std::sync::Arc;

use crate::agents::{PlanExtractor, RecommendationAgent};
use crate::config::AppConfig;
use crate::services::{
    ActivityService, PlanImportService, PlanService, ProgressService, RecommendationService,
    UserService, WorkoutSessionService,
};
use crate::store::TrainingStore;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub plan_import: Arc<PlanImportService>,
    pub plans: Arc<PlanService>,
    pub workouts: Arc<WorkoutSessionService>,
    pub progress: Arc<ProgressService>,
    pub recommendations: Arc<RecommendationService>,
    pub activities: Arc<ActivityService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TrainingStore>,
        extractor: Arc<dyn PlanExtractor>,
        recommender: Arc<dyn RecommendationAgent>,
        config: &AppConfig,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(store.clone())),
            plan_import: Arc::new(PlanImportService::new(
                store.clone(),
                extractor,
                config.plan_validity_days,
            )),
            plans: Arc::new(PlanService::new(store.clone())),
            workouts: Arc::new(WorkoutSessionService::new(store.clone())),
            progress: Arc::new(ProgressService::new(store.clone())),
            recommendations: Arc::new(RecommendationService::new(
                store.clone(),
                recommender,
                config.min_logs_for_recommendations,
            )),
            activities: Arc::new(ActivityService::new(store)),
        }
    }
}
