use std::sync::Arc;
use uuid::Uuid;

use crate::auth::UserSession;
use crate::errors::{AppError, AppResult};
use crate::models::{CreateUserProfile, UserProfile};
use crate::store::TrainingStore;

pub struct UserService {
    store: Arc<dyn TrainingStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    /// Sign-in hook: the profile is created the first time a user shows up
    /// and left untouched afterwards.
    #[tracing::instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn ensure_profile(&self, session: &UserSession) -> AppResult<UserProfile> {
        let profile = self
            .store
            .create_user_profile_if_absent(CreateUserProfile {
                id: session.user_id,
                email: session.email.clone(),
                display_name: session.display_name.clone(),
            })
            .await?;

        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.store
            .get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found. Please sign in first."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTrainingStore;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_profile_is_created_lazily() {
        let service = UserService::new(Arc::new(InMemoryTrainingStore::new()));
        let session = UserSession {
            user_id: Uuid::new_v4(),
            email: Some("runner@example.com".to_string()),
            display_name: Some("Runner".to_string()),
        };

        assert_matches!(
            service.get_profile(session.user_id).await,
            Err(AppError::NotFound(_))
        );

        let created = service.ensure_profile(&session).await.unwrap();
        let again = service.ensure_profile(&session).await.unwrap();

        assert_eq!(created, again);
        assert_eq!(
            service.get_profile(session.user_id).await.unwrap().display_name.as_deref(),
            Some("Runner")
        );
    }
}
