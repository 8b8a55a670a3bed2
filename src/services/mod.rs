// Business logic services

pub mod activity_service;
pub mod plan_import_service;
pub mod plan_service;
pub mod progress_service;
pub mod recommendation_service;
pub mod user_service;
pub mod workout_session_service;

pub use activity_service::ActivityService;
pub use plan_import_service::{PlanImportService, PlanUpload};
pub use plan_service::PlanService;
pub use progress_service::ProgressService;
pub use recommendation_service::RecommendationService;
pub use user_service::UserService;
pub use workout_session_service::WorkoutSessionService;
