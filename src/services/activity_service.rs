use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{CreateExtraActivity, ExtraActivity, LogActivityRequest};
use crate::store::TrainingStore;

pub struct ActivityService {
    store: Arc<dyn TrainingStore>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    pub async fn log_activity(
        &self,
        user_id: Uuid,
        request: LogActivityRequest,
    ) -> AppResult<ExtraActivity> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::validation("Please enter the activity name."))?;

        let activity = self
            .store
            .insert_extra_activity(CreateExtraActivity {
                user_id,
                name: name.to_string(),
                date: request.date.unwrap_or_else(Utc::now),
            })
            .await?;

        Ok(activity)
    }

    /// Most recent first
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<ExtraActivity>> {
        Ok(self.store.list_extra_activities(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTrainingStore;
    use assert_matches::assert_matches;
    use chrono::Duration;

    #[tokio::test]
    async fn test_log_and_list_activities() {
        let service = ActivityService::new(Arc::new(InMemoryTrainingStore::new()));
        let user = Uuid::new_v4();
        let yesterday = Utc::now() - Duration::days(1);

        service
            .log_activity(
                user,
                LogActivityRequest {
                    name: Some("Trail run".to_string()),
                    date: Some(yesterday),
                },
            )
            .await
            .unwrap();
        service
            .log_activity(
                user,
                LogActivityRequest {
                    name: Some(" Football ".to_string()),
                    date: None,
                },
            )
            .await
            .unwrap();

        let activities = service.list(user).await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].name, "Football");
        assert_eq!(activities[1].date, yesterday);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let service = ActivityService::new(Arc::new(InMemoryTrainingStore::new()));
        let result = service
            .log_activity(
                Uuid::new_v4(),
                LogActivityRequest {
                    name: Some("   ".to_string()),
                    date: None,
                },
            )
            .await;

        assert_matches!(result, Err(AppError::Validation(_)));
    }
}
