use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TrainingStore};
use crate::models::{
    CreateExerciseLog, CreateExtraActivity, CreateUserProfile, ExerciseLog, ExtraActivity,
    NewTrainingPlan, TrainingPlan, UserProfile,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, UserProfile>,
    plans: Vec<TrainingPlan>,
    logs: Vec<ExerciseLog>,
    activities: Vec<ExtraActivity>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Server clock; never returns the same instant twice
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }
}

/// Whole-store lock: every write, including the plan swap, happens under one
/// write guard, so readers never observe a half-applied batch.
#[derive(Debug, Default)]
pub struct InMemoryTrainingStore {
    state: RwLock<MemoryState>,
}

impl InMemoryTrainingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrainingStore for InMemoryTrainingStore {
    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn create_user_profile_if_absent(
        &self,
        profile: CreateUserProfile,
    ) -> Result<UserProfile, StoreError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.users.get(&profile.id) {
            return Ok(existing.clone());
        }

        let created_at = state.next_timestamp();
        let stored = UserProfile {
            id: profile.id,
            email: profile.email,
            display_name: profile.display_name,
            created_at,
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_active_plan(&self, user_id: Uuid) -> Result<Option<TrainingPlan>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .plans
            .iter()
            .find(|plan| plan.user_id == user_id && plan.is_active)
            .cloned())
    }

    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<TrainingPlan>, StoreError> {
        let state = self.state.read().await;
        let mut plans: Vec<TrainingPlan> = state
            .plans
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn replace_active_plan(&self, plan: NewTrainingPlan) -> Result<TrainingPlan, StoreError> {
        let mut state = self.state.write().await;
        let created_at = state.next_timestamp();

        for existing in state
            .plans
            .iter_mut()
            .filter(|existing| existing.user_id == plan.user_id)
        {
            existing.is_active = false;
        }

        let stored = TrainingPlan {
            id: Uuid::new_v4(),
            user_id: plan.user_id,
            name: plan.name,
            start_date: plan.start_date,
            end_date: plan.end_date,
            is_active: true,
            exercises_by_day: plan.exercises_by_day,
            number_of_days: plan.number_of_days,
            created_at,
        };
        state.plans.push(stored.clone());
        Ok(stored)
    }

    async fn insert_exercise_log(&self, log: CreateExerciseLog) -> Result<ExerciseLog, StoreError> {
        let mut state = self.state.write().await;
        let logged_at = state.next_timestamp();

        let stored = ExerciseLog {
            id: Uuid::new_v4(),
            user_id: log.user_id,
            plan_id: log.plan_id,
            day: log.day,
            exercise_name: log.exercise_name,
            weight: log.weight,
            reps: log.reps,
            logged_at,
        };
        state.logs.push(stored.clone());
        Ok(stored)
    }

    async fn list_exercise_logs(&self, user_id: Uuid) -> Result<Vec<ExerciseLog>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_exercise_logs_by_name(
        &self,
        user_id: Uuid,
        exercise_name: &str,
    ) -> Result<Vec<ExerciseLog>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .iter()
            .filter(|log| log.user_id == user_id && log.exercise_name == exercise_name)
            .cloned()
            .collect())
    }

    async fn insert_extra_activity(
        &self,
        activity: CreateExtraActivity,
    ) -> Result<ExtraActivity, StoreError> {
        let mut state = self.state.write().await;
        let stored = ExtraActivity {
            id: Uuid::new_v4(),
            user_id: activity.user_id,
            name: activity.name,
            date: activity.date,
        };
        state.activities.push(stored.clone());
        Ok(stored)
    }

    async fn list_extra_activities(&self, user_id: Uuid) -> Result<Vec<ExtraActivity>, StoreError> {
        let state = self.state.read().await;
        let mut activities: Vec<ExtraActivity> = state
            .activities
            .iter()
            .filter(|activity| activity.user_id == user_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(activities)
    }
}
