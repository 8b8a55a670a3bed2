//! Persistence seam for users, plans, exercise logs and extra activities.
//!
//! - `postgres`: sqlx implementation used in deployments
//! - `memory`: in-process implementation for local development and tests

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTrainingStore;
pub use postgres::PgTrainingStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CreateExerciseLog, CreateExtraActivity, CreateUserProfile, ExerciseLog, ExtraActivity,
    NewTrainingPlan, TrainingPlan, UserProfile,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TrainingStore: Send + Sync {
    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    /// Insert the profile unless one already exists; returns the stored profile
    async fn create_user_profile_if_absent(
        &self,
        profile: CreateUserProfile,
    ) -> Result<UserProfile, StoreError>;

    async fn get_active_plan(&self, user_id: Uuid) -> Result<Option<TrainingPlan>, StoreError>;

    /// Newest first, superseded plans included
    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<TrainingPlan>, StoreError>;

    /// Deactivate every active plan of the owner and insert `plan` as the
    /// active one. Both writes land together or not at all.
    async fn replace_active_plan(&self, plan: NewTrainingPlan) -> Result<TrainingPlan, StoreError>;

    /// Append a log; the store assigns `id` and `logged_at`
    async fn insert_exercise_log(&self, log: CreateExerciseLog) -> Result<ExerciseLog, StoreError>;

    /// All logs of a user in no particular order
    async fn list_exercise_logs(&self, user_id: Uuid) -> Result<Vec<ExerciseLog>, StoreError>;

    /// Logs of one exercise in no particular order
    async fn list_exercise_logs_by_name(
        &self,
        user_id: Uuid,
        exercise_name: &str,
    ) -> Result<Vec<ExerciseLog>, StoreError>;

    async fn insert_extra_activity(
        &self,
        activity: CreateExtraActivity,
    ) -> Result<ExtraActivity, StoreError>;

    async fn list_extra_activities(&self, user_id: Uuid) -> Result<Vec<ExtraActivity>, StoreError>;
}
