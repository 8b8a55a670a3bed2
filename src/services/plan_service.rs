use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{PlanSummary, TrainingPlan};
use crate::store::TrainingStore;

pub struct PlanService {
    store: Arc<dyn TrainingStore>,
}

impl PlanService {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    /// Active plan with its days in training order
    pub async fn active_plan(&self, user_id: Uuid) -> AppResult<PlanSummary> {
        let plan = self.store.get_active_plan(user_id).await?.ok_or_else(|| {
            AppError::not_found("You don't have an active plan yet. Import your first plan to get started.")
        })?;

        Ok(PlanSummary::from(plan))
    }

    pub async fn history(&self, user_id: Uuid) -> AppResult<Vec<TrainingPlan>> {
        Ok(self.store.list_plans(user_id).await?)
    }
}
