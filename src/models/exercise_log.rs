use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One completed exercise instance. Never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ExerciseLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub day: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: i32,
    /// Assigned by the store on insert
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateExerciseLog {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub day: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: i32,
}
