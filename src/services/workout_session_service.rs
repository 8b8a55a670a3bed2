use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::day_label::{day_title, normalize_day_key};
use crate::models::{
    CompleteExerciseRequest, CreateExerciseLog, ExerciseLog, TrainingPlan, WorkoutDay,
    WorkoutExercise,
};
use crate::store::TrainingStore;

const NO_ACTIVE_PLAN: &str = "No active plan found. Import a plan first.";

pub struct WorkoutSessionService {
    store: Arc<dyn TrainingStore>,
}

impl WorkoutSessionService {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    /// Exercises of the requested day with the user's history folded in.
    /// A day missing from the plan yields an empty exercise list.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn open_day(&self, user_id: Uuid, day: &str) -> AppResult<WorkoutDay> {
        let (plan, logs) = futures::try_join!(
            self.store.get_active_plan(user_id),
            self.store.list_exercise_logs(user_id)
        )?;
        let plan = plan.ok_or_else(|| AppError::not_found(NO_ACTIVE_PLAN))?;

        Ok(build_workout_day(&plan, day, &logs, Utc::now()))
    }

    /// Append one log for an exercise of the requested day
    #[tracing::instrument(skip(self, request), fields(user_id = %user_id, exercise = %request.exercise_name))]
    pub async fn complete_exercise(
        &self,
        user_id: Uuid,
        day: &str,
        request: CompleteExerciseRequest,
    ) -> AppResult<ExerciseLog> {
        let (weight, reps) = request.validate()?;
        let exercise_name = request.exercise_name.trim();

        let plan = self
            .store
            .get_active_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(NO_ACTIVE_PLAN))?;

        let (label, exercises) = plan
            .find_day(day)
            .ok_or_else(|| AppError::not_found("That day is not part of your active plan."))?;

        if !exercises.iter().any(|name| name == exercise_name) {
            return Err(AppError::validation(format!(
                "{} is not part of {}.",
                exercise_name, label
            )));
        }

        let log = self
            .store
            .insert_exercise_log(CreateExerciseLog {
                user_id,
                plan_id: plan.id,
                day: normalize_day_key(label),
                exercise_name: exercise_name.to_string(),
                weight,
                reps,
            })
            .await?;

        tracing::info!(log_id = %log.id, weight, reps, "exercise completed");
        Ok(log)
    }
}

pub fn build_workout_day(
    plan: &TrainingPlan,
    day: &str,
    logs: &[ExerciseLog],
    now: DateTime<Utc>,
) -> WorkoutDay {
    let since = week_start(now);
    let slug = normalize_day_key(day);

    let (day_label, exercises) = match plan.find_day(day) {
        Some((label, names)) => (
            Some(label.to_string()),
            names
                .iter()
                .map(|name| {
                    let last_completed_at = last_completed_since(logs, name, since);
                    WorkoutExercise {
                        name: name.clone(),
                        max_weight: max_weight_for(logs, name),
                        completed_this_week: last_completed_at.is_some(),
                        last_completed_at,
                    }
                })
                .collect(),
        ),
        None => (None, Vec::new()),
    };

    WorkoutDay {
        plan_id: plan.id,
        plan_name: plan.name.clone(),
        title: day_title(&slug),
        day: slug,
        day_label,
        exercises,
    }
}

/// Sunday 00:00 UTC of the week containing `now`
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let sunday = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    Utc.from_utc_datetime(&sunday.and_time(NaiveTime::default()))
}

/// Heaviest weight ever logged for the exercise, in any plan
pub fn max_weight_for(logs: &[ExerciseLog], exercise_name: &str) -> Option<f64> {
    logs.iter()
        .filter(|log| log.exercise_name == exercise_name)
        .map(|log| log.weight)
        .fold(None, |max, weight| match max {
            Some(current) if current >= weight => Some(current),
            _ => Some(weight),
        })
}

pub fn last_completed_since(
    logs: &[ExerciseLog],
    exercise_name: &str,
    since: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    logs.iter()
        .filter(|log| log.exercise_name == exercise_name && log.logged_at >= since)
        .map(|log| log.logged_at)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnteredValue, ExercisesByDay, NewTrainingPlan};
    use crate::store::InMemoryTrainingStore;
    use assert_matches::assert_matches;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn log(name: &str, weight: f64, logged_at: DateTime<Utc>) -> ExerciseLog {
        ExerciseLog {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            plan_id: Uuid::nil(),
            day: "dia-1".to_string(),
            exercise_name: name.to_string(),
            weight,
            reps: 10,
            logged_at,
        }
    }

    async fn store_with_plan(user: Uuid) -> Arc<InMemoryTrainingStore> {
        let store = Arc::new(InMemoryTrainingStore::new());
        let mut days = ExercisesByDay::new();
        days.insert("Día 1".to_string(), vec!["Squats".to_string(), "Lunges".to_string()]);
        let now = Utc::now();
        store
            .replace_active_plan(NewTrainingPlan {
                user_id: user,
                name: "Test".to_string(),
                start_date: now,
                end_date: now + Duration::days(60),
                exercises_by_day: days,
                number_of_days: 1,
            })
            .await
            .unwrap();
        store
    }

    fn complete(name: &str, weight: f64, reps: f64) -> CompleteExerciseRequest {
        CompleteExerciseRequest {
            exercise_name: name.to_string(),
            weight: Some(EnteredValue::Number(weight)),
            reps: Some(EnteredValue::Number(reps)),
        }
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-06-05 is a Wednesday
        assert_eq!(
            week_start(at("2024-06-05T15:30:00Z")),
            at("2024-06-02T00:00:00Z")
        );
        // a Sunday is its own week start
        assert_eq!(
            week_start(at("2024-06-02T08:00:00Z")),
            at("2024-06-02T00:00:00Z")
        );
        // Saturday night still belongs to the previous Sunday
        assert_eq!(
            week_start(at("2024-06-08T23:59:59Z")),
            at("2024-06-02T00:00:00Z")
        );
    }

    #[test]
    fn test_max_weight_spans_all_logs() {
        let t = at("2024-06-05T10:00:00Z");
        let logs = vec![log("Squats", 80.0, t), log("Squats", 95.0, t), log("Rows", 120.0, t)];

        assert_eq!(max_weight_for(&logs, "Squats"), Some(95.0));
        assert_eq!(max_weight_for(&logs, "Lunges"), None);
    }

    #[test]
    fn test_completed_this_week_ignores_previous_weeks() {
        let now = at("2024-06-05T10:00:00Z");
        let logs = vec![
            log("Squats", 80.0, at("2024-06-01T18:00:00Z")),
            log("Lunges", 20.0, at("2024-06-03T18:00:00Z")),
        ];

        let mut days = ExercisesByDay::new();
        days.insert("Día 1".to_string(), vec!["Squats".to_string(), "Lunges".to_string()]);
        let plan = TrainingPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Test".to_string(),
            start_date: now,
            end_date: now,
            is_active: true,
            exercises_by_day: days,
            number_of_days: 1,
            created_at: now,
        };

        let workout = build_workout_day(&plan, "dia-1", &logs, now);
        assert_eq!(workout.title, "Dia 1");
        assert_eq!(workout.day_label.as_deref(), Some("Día 1"));
        assert!(!workout.exercises[0].completed_this_week);
        assert_eq!(workout.exercises[0].max_weight, Some(80.0));
        assert!(workout.exercises[1].completed_this_week);

        let missing = build_workout_day(&plan, "dia-9", &logs, now);
        assert!(missing.day_label.is_none());
        assert!(missing.exercises.is_empty());
    }

    #[tokio::test]
    async fn test_complete_exercise_appends_log() {
        let user = Uuid::new_v4();
        let store = store_with_plan(user).await;
        let service = WorkoutSessionService::new(store.clone());

        let log = service
            .complete_exercise(user, "DIA 1", complete("Squats", 80.0, 10.0))
            .await
            .unwrap();
        assert_eq!(log.day, "dia-1");
        assert_eq!(log.weight, 80.0);

        let workout = service.open_day(user, "dia-1").await.unwrap();
        assert_eq!(workout.exercises[0].max_weight, Some(80.0));
        assert!(workout.exercises[0].completed_this_week);
        assert_eq!(store.list_exercise_logs(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_exercise_rejects_unknown_targets() {
        let user = Uuid::new_v4();
        let service = WorkoutSessionService::new(store_with_plan(user).await);

        assert_matches!(
            service
                .complete_exercise(user, "dia-1", complete("Deadlift", 100.0, 5.0))
                .await,
            Err(AppError::Validation(_))
        );
        assert_matches!(
            service
                .complete_exercise(user, "dia-7", complete("Squats", 100.0, 5.0))
                .await,
            Err(AppError::NotFound(_))
        );
        assert_matches!(
            service.open_day(Uuid::new_v4(), "dia-1").await,
            Err(AppError::NotFound(_))
        );
    }
}
