use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::agents::{AgentError, RecommendationAgent};
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseLog, RecommendationInput, RecommendationSet};
use crate::store::TrainingStore;

/// Log entry as sent to the recommendation agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry<'a> {
    id: Uuid,
    plan_id: Uuid,
    exercise_name: &'a str,
    day: &'a str,
    weight: f64,
    reps: i32,
    date: DateTime<Utc>,
}

impl<'a> From<&'a ExerciseLog> for HistoryEntry<'a> {
    fn from(log: &'a ExerciseLog) -> Self {
        Self {
            id: log.id,
            plan_id: log.plan_id,
            exercise_name: &log.exercise_name,
            day: &log.day,
            weight: log.weight,
            reps: log.reps,
            date: log.logged_at,
        }
    }
}

pub struct RecommendationService {
    store: Arc<dyn TrainingStore>,
    agent: Arc<dyn RecommendationAgent>,
    min_logs: usize,
}

impl RecommendationService {
    pub fn new(
        store: Arc<dyn TrainingStore>,
        agent: Arc<dyn RecommendationAgent>,
        min_logs: usize,
    ) -> Self {
        Self {
            store,
            agent,
            min_logs,
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn recommend(&self, user_id: Uuid) -> AppResult<RecommendationSet> {
        let mut logs = self.store.list_exercise_logs(user_id).await?;

        if logs.len() < self.min_logs {
            return Err(AppError::InsufficientData(format!(
                "Please log at least {} exercises to receive personalized recommendations.",
                self.min_logs
            )));
        }

        logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        let history_json = serialize_history(&logs)?;

        let recommendations = self
            .agent
            .recommend(&RecommendationInput::from_history(history_json))
            .await?;

        let message = recommendations
            .is_empty()
            .then(|| "No recommendations right now. Keep training and check back later.".to_string());

        tracing::info!(count = recommendations.len(), analyzed = logs.len(), "recommendations generated");

        Ok(RecommendationSet {
            recommendations,
            analyzed_logs: logs.len(),
            message,
        })
    }
}

/// JSON array of the logs in the order given
fn serialize_history(logs: &[ExerciseLog]) -> Result<String, AgentError> {
    let entries: Vec<HistoryEntry<'_>> = logs.iter().map(HistoryEntry::from).collect();
    serde_json::to_string(&entries)
        .map_err(|e| AgentError::Malformed(format!("could not serialize history: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::MockRecommendationAgent;
    use crate::models::CreateExerciseLog;
    use crate::store::InMemoryTrainingStore;
    use assert_matches::assert_matches;
    use mockall::predicate::always;

    async fn store_with_logs(user: Uuid, count: usize) -> Arc<InMemoryTrainingStore> {
        let store = Arc::new(InMemoryTrainingStore::new());
        for i in 0..count {
            store
                .insert_exercise_log(CreateExerciseLog {
                    user_id: user,
                    plan_id: Uuid::nil(),
                    day: "dia-1".to_string(),
                    exercise_name: "Squats".to_string(),
                    weight: 80.0 + i as f64,
                    reps: 10,
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_refuses_below_threshold() {
        let user = Uuid::new_v4();
        let mut agent = MockRecommendationAgent::new();
        agent.expect_recommend().never();

        let service = RecommendationService::new(store_with_logs(user, 4).await, Arc::new(agent), 5);

        assert_matches!(
            service.recommend(user).await,
            Err(AppError::InsufficientData(message)) if message.contains("at least 5")
        );
    }

    #[tokio::test]
    async fn test_sends_identical_history_newest_first() {
        let user = Uuid::new_v4();
        let mut agent = MockRecommendationAgent::new();
        agent
            .expect_recommend()
            .with(always())
            .times(1)
            .returning(|input| {
                assert_eq!(input.progress_data, input.consistency_data);
                assert_eq!(input.progress_data, input.training_patterns);

                let history: Vec<serde_json::Value> =
                    serde_json::from_str(&input.progress_data).unwrap();
                assert_eq!(history.len(), 5);
                assert_eq!(history[0]["weight"], 84.0);
                assert_eq!(history[4]["weight"], 80.0);
                assert_eq!(history[0]["planId"], Uuid::nil().to_string());
                assert!(history[0]["id"].is_string());

                Ok(vec!["Add a fourth set of squats".to_string()])
            });

        let service = RecommendationService::new(store_with_logs(user, 5).await, Arc::new(agent), 5);
        let set = service.recommend(user).await.unwrap();

        assert_eq!(set.recommendations, vec!["Add a fourth set of squats".to_string()]);
        assert_eq!(set.analyzed_logs, 5);
        assert!(set.message.is_none());
    }

    #[tokio::test]
    async fn test_empty_answer_is_not_an_error() {
        let user = Uuid::new_v4();
        let mut agent = MockRecommendationAgent::new();
        agent.expect_recommend().returning(|_| Ok(Vec::new()));

        let service = RecommendationService::new(store_with_logs(user, 6).await, Arc::new(agent), 5);
        let set = service.recommend(user).await.unwrap();

        assert!(set.recommendations.is_empty());
        assert!(set.message.is_some());
    }

    #[tokio::test]
    async fn test_agent_failure_surfaces_as_agent_error() {
        let user = Uuid::new_v4();
        let mut agent = MockRecommendationAgent::new();
        agent
            .expect_recommend()
            .returning(|_| Err(AgentError::Malformed("not json".to_string())));

        let service = RecommendationService::new(store_with_logs(user, 5).await, Arc::new(agent), 5);
        assert_matches!(service.recommend(user).await, Err(AppError::Agent(_)));
    }
}
