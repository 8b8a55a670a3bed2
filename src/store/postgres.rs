use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::{StoreError, TrainingStore};
use crate::models::{
    CreateExerciseLog, CreateExtraActivity, CreateUserProfile, ExerciseLog, ExercisesByDay,
    ExtraActivity, NewTrainingPlan, TrainingPlan, UserProfile,
};

const PLAN_COLUMNS: &str =
    "id, user_id, name, start_date, end_date, is_active, exercises_by_day, number_of_days, created_at";
const LOG_COLUMNS: &str = "id, user_id, plan_id, day, exercise_name, weight, reps, logged_at";

#[derive(Debug, FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_active: bool,
    exercises_by_day: Json<ExercisesByDay>,
    number_of_days: i32,
    created_at: DateTime<Utc>,
}

impl From<PlanRow> for TrainingPlan {
    fn from(row: PlanRow) -> Self {
        TrainingPlan {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            exercises_by_day: row.exercises_by_day.0,
            number_of_days: row.number_of_days,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgTrainingStore {
    db: PgPool,
}

impl PgTrainingStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrainingStore for PgTrainingStore {
    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, email, display_name, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    async fn create_user_profile_if_absent(
        &self,
        profile: CreateUserProfile,
    ) -> Result<UserProfile, StoreError> {
        sqlx::query(
            "INSERT INTO users (id, email, display_name) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .execute(&self.db)
        .await?;

        self.get_user_profile(profile.id)
            .await?
            .ok_or_else(|| StoreError::NotFound("User profile".to_string()))
    }

    async fn get_active_plan(&self, user_id: Uuid) -> Result<Option<TrainingPlan>, StoreError> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = $1 AND is_active LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(TrainingPlan::from))
    }

    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<TrainingPlan>, StoreError> {
        let rows = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(TrainingPlan::from).collect())
    }

    async fn replace_active_plan(&self, plan: NewTrainingPlan) -> Result<TrainingPlan, StoreError> {
        let mut tx = self.db.begin().await?;

        let deactivated = sqlx::query("UPDATE plans SET is_active = FALSE WHERE user_id = $1 AND is_active")
            .bind(plan.user_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "INSERT INTO plans (id, user_id, name, start_date, end_date, is_active, exercises_by_day, number_of_days)
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7)
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(plan.user_id)
        .bind(&plan.name)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(Json(&plan.exercises_by_day))
        .bind(plan.number_of_days)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id = %plan.user_id,
            deactivated = deactivated.rows_affected(),
            "active plan replaced"
        );

        Ok(row.into())
    }

    async fn insert_exercise_log(&self, log: CreateExerciseLog) -> Result<ExerciseLog, StoreError> {
        let log = sqlx::query_as::<_, ExerciseLog>(&format!(
            "INSERT INTO training_logs (id, user_id, plan_id, day, exercise_name, weight, reps)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {LOG_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(log.user_id)
        .bind(log.plan_id)
        .bind(&log.day)
        .bind(&log.exercise_name)
        .bind(log.weight)
        .bind(log.reps)
        .fetch_one(&self.db)
        .await?;

        Ok(log)
    }

    async fn list_exercise_logs(&self, user_id: Uuid) -> Result<Vec<ExerciseLog>, StoreError> {
        let logs = sqlx::query_as::<_, ExerciseLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM training_logs WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn list_exercise_logs_by_name(
        &self,
        user_id: Uuid,
        exercise_name: &str,
    ) -> Result<Vec<ExerciseLog>, StoreError> {
        let logs = sqlx::query_as::<_, ExerciseLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM training_logs WHERE user_id = $1 AND exercise_name = $2"
        ))
        .bind(user_id)
        .bind(exercise_name)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn insert_extra_activity(
        &self,
        activity: CreateExtraActivity,
    ) -> Result<ExtraActivity, StoreError> {
        let activity = sqlx::query_as::<_, ExtraActivity>(
            "INSERT INTO extra_activities (id, user_id, name, date) VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, name, date",
        )
        .bind(Uuid::new_v4())
        .bind(activity.user_id)
        .bind(&activity.name)
        .bind(activity.date)
        .fetch_one(&self.db)
        .await?;

        Ok(activity)
    }

    async fn list_extra_activities(&self, user_id: Uuid) -> Result<Vec<ExtraActivity>, StoreError> {
        let activities = sqlx::query_as::<_, ExtraActivity>(
            "SELECT id, user_id, name, date FROM extra_activities WHERE user_id = $1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(activities)
    }
}
