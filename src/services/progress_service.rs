use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{ExerciseLog, ProgressPoint, ProgressSeries};
use crate::store::TrainingStore;

pub struct ProgressService {
    store: Arc<dyn TrainingStore>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    /// Every exercise the user has logged at least once, sorted
    pub async fn exercise_names(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let logs = self.store.list_exercise_logs(user_id).await?;

        Ok(logs
            .into_iter()
            .map(|log| log.exercise_name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    /// Weight series of one exercise; without a selection the first logged
    /// exercise is used.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn series(&self, user_id: Uuid, exercise: Option<&str>) -> AppResult<ProgressSeries> {
        let selected = match exercise.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => match self.exercise_names(user_id).await?.into_iter().next() {
                Some(first) => first,
                None => return Ok(ProgressSeries::empty()),
            },
        };

        let logs = self
            .store
            .list_exercise_logs_by_name(user_id, &selected)
            .await?;

        Ok(build_series(selected, logs))
    }
}

/// Points ordered by log time, oldest first
pub fn build_series(exercise: String, mut logs: Vec<ExerciseLog>) -> ProgressSeries {
    logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at).then_with(|| a.id.cmp(&b.id)));

    let points = logs
        .into_iter()
        .map(|log| ProgressPoint {
            date: log.logged_at,
            label: log.logged_at.format("%b %-d").to_string(),
            weight: log.weight,
            reps: log.reps,
        })
        .collect();

    ProgressSeries::new(Some(exercise), points)
}
